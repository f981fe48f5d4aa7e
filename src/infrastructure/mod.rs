//! Infrastructure layer: I/O implementations
//!
//! This layer implements the filesystem and structured-text codec boundaries.

pub mod codec;
pub mod error;
pub mod traits;

pub use codec::JsonCodec;
pub use error::{InfraError, InfraResult};
pub use traits::{FileSystem, RealFileSystem, TextCodec};
