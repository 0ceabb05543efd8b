//! Form error types

use thiserror::Error;

use crate::locale::t;

/// Validation error attached to a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Required field is empty after trimming
    #[error("{}", t("Demo.valueIsRequired"))]
    Required,

    /// Number field contains a non-digit
    #[error("{}", t("Demo.valueIsNotANumber"))]
    NotANumber,
}

/// Errors raised by the form and input managers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// An input with this name is already registered in the form
    #[error("Input {0} is already registered")]
    DuplicateInput(String),

    /// No input with this name is registered in the form
    #[error("Input {0} is not registered")]
    UnknownInput(String),

    /// Value read while the field is invalid or empty and required
    #[error("Value of input {0} is not available")]
    ValueUnavailable(String),

    /// Value read as a different kind than the field holds
    #[error("Input {name} is not a {expected} input")]
    KindMismatch { name: String, expected: &'static str },

    /// Enumeration value outside the allowed values
    #[error("Value {value} is not allowed for input {name}")]
    NotAllowed { name: String, value: String },

    /// Number field holds more digits than fit in a 64-bit value
    #[error("Value {value} of input {name} is too large")]
    NumberOutOfRange { name: String, value: String },
}

/// Result type for form operations
pub type Result<T> = std::result::Result<T, FormError>;
