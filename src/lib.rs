//! Scene node tree: groups and shapes over pluggable geometry, with a tagged
//! structured-text encoding.
//!
//! - `domain`: node tree, style, axis, type registry, encode/decode
//! - `infrastructure`: filesystem and codec boundaries
//! - `application`: file-level read/write service
//! - `config`: layered settings for written documents

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod util;

pub use application::{ApplicationError, ApplicationResult, SceneFileService};
pub use config::Settings;
pub use domain::{
    BoundingBox, Diagnostics, DomainError, DomainResult, Geometry, GroupNode, Node, SceneAxis,
    SceneNode, Shape, ShapeNode, Style, TypeRegistry,
};
