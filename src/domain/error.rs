//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent contract violations in the node model.
/// These are independent of persistence concerns.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid or unknown constructor/`add()` argument. No object is produced.
    #[error("invalid argument: {message}")]
    Argument { message: String },

    /// The referenced geometry satisfies neither the planar nor the spatial capability.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// The discriminator is not present in the type registry.
    #[error("unresolved type: {0}")]
    UnresolvedType(String),

    #[error("missing Type discriminator in {context}")]
    MissingDiscriminator { context: String },

    /// A recognized field carries a value of the wrong shape.
    #[error("invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },
}

impl DomainError {
    pub fn argument(message: impl Into<String>) -> Self {
        Self::Argument {
            message: message.into(),
        }
    }

    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
