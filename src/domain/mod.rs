//! Domain layer: the scene tree and its serialization protocol
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod axis;
pub mod diagnostics;
pub mod display;
pub mod error;
pub mod fields;
pub mod geometry;
pub mod group;
pub mod legacy;
pub mod node;
pub mod params;
pub mod registry;
pub mod shape_node;
pub mod style;

pub use axis::SceneAxis;
pub use diagnostics::{Diagnostics, Warning};
pub use display::TreeDisplay;
pub use error::{DomainError, DomainResult};
pub use geometry::{
    BoundingBox, DecodeGeometry, DrawHandle, Geometry, GeometryClass, Planar, Primitive, Spatial,
    Transform,
};
pub use group::GroupNode;
pub use legacy::Shape;
pub use node::{Node, NodeMeta, SceneNode};
pub use params::Param;
pub use registry::TypeRegistry;
pub use shape_node::ShapeNode;
pub use style::Style;
