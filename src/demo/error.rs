//! Processing outcome errors

use std::any::Any;

use thiserror::Error;
use tracing::{debug, error};

use crate::form::FormError;
use crate::toolkit::ToolkitError;
use crate::ui::InputError;

/// Error returned by a form's process callback
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    /// Input is syntactically valid but out of bounds; an expected user error
    #[error("{0}")]
    Range(String),

    /// Any other typed error
    #[error("{0}")]
    Unexpected(String),

    /// Not a typed error, e.g. a panic inside the callback
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl ProcessError {
    /// Log according to severity: range errors are expected and only traced
    /// at debug level
    pub fn log(&self, title: &str, subtitle: &str) {
        match self {
            Self::Range(message) => debug!(title, subtitle, message = %message, "range error"),
            Self::Unexpected(message) => {
                error!(title, subtitle, message = %message, "processing failed");
            }
            Self::Unknown(message) => error!(title, subtitle, message = %message, "unknown error"),
        }
    }

    pub(crate) fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panic".to_string());

        Self::Unknown(message)
    }
}

impl From<ToolkitError> for ProcessError {
    fn from(e: ToolkitError) -> Self {
        match e {
            ToolkitError::Range(message) => Self::Range(message),
            ToolkitError::Unsupported(_) => Self::Unexpected(e.to_string()),
        }
    }
}

impl From<FormError> for ProcessError {
    fn from(e: FormError) -> Self {
        match e {
            FormError::NumberOutOfRange { .. } => Self::Range(e.to_string()),
            _ => Self::Unexpected(e.to_string()),
        }
    }
}

impl From<InputError> for ProcessError {
    fn from(e: InputError) -> Self {
        Self::Unexpected(e.to_string())
    }
}
