//! Toolkit error types

use thiserror::Error;

/// Errors raised by the identification-key and character-set toolkit
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolkitError {
    /// Input is well-formed but outside what the operation accepts
    #[error("{0}")]
    Range(String),

    /// The selected creator or validator cannot perform the operation
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

impl ToolkitError {
    pub(crate) fn range(message: impl Into<String>) -> Self {
        Self::Range(message.into())
    }

    pub(crate) fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }
}

/// Result type for toolkit operations
pub type Result<T> = std::result::Result<T, ToolkitError>;
