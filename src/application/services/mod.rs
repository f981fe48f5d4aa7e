//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, TextCodec)
//! but are themselves concrete structs, not traits.

mod scene_file;

pub use scene_file::SceneFileService;
