//! Field kinds and typed values

use std::fmt;

use super::error::FieldError;

/// Kind of value a field holds
///
/// The raw value of every field is a string; the kind decides how it is
/// checked and parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    String,
    Number,
    Boolean,
}

/// Typed value of a validated field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputValue {
    /// Trimmed text
    Text(String),
    /// Decimal digits, or `None` if the field is optional and empty
    ///
    /// Digits are kept as text so that a field never fails validation on
    /// magnitude alone; conversion happens when the value is read.
    Number(Option<String>),
    Boolean(bool),
}

impl InputKind {
    /// Raw value a field of this kind starts from when nothing is cached
    #[must_use]
    pub const fn default_raw_value(self) -> &'static str {
        match self {
            Self::String | Self::Number => "",
            Self::Boolean => "false",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }

    /// Check a trimmed raw value
    ///
    /// # Errors
    ///
    /// Returns `FieldError::Required` if `required` and the value is empty,
    /// `FieldError::NotANumber` if a number field contains a non-digit.
    pub fn check(self, trimmed: &str, required: bool) -> Result<(), FieldError> {
        if required && trimmed.is_empty() {
            return Err(FieldError::Required);
        }

        if self == Self::Number && !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FieldError::NotANumber);
        }

        Ok(())
    }

    /// Parse a trimmed raw value that passed [`Self::check`]
    #[must_use]
    pub fn parse(self, trimmed: &str) -> InputValue {
        match self {
            Self::String => InputValue::Text(trimmed.to_string()),
            Self::Number if trimmed.is_empty() => InputValue::Number(None),
            Self::Number => InputValue::Number(Some(trimmed.to_string())),
            Self::Boolean => InputValue::Boolean(trimmed == true.to_string()),
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
