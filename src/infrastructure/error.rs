//! Infrastructure-level errors (codec and text encoding concerns)

use thiserror::Error;

/// Infrastructure errors raised at the structured-text boundary.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("codec error: {context}")]
    Codec {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("document is not valid UTF-8: {0}")]
    Encoding(String),
}

impl InfraError {
    /// Create a codec error with context.
    pub fn codec(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Codec {
            context: context.into(),
            source,
        }
    }
}

/// Result type for infrastructure layer operations.
pub type InfraResult<T> = Result<T, InfraError>;
