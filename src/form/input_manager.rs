//! Per-field state

use std::fmt;

use tracing::{debug, trace};

use super::error::{FieldError, FormError, Result};
use super::kind::{InputKind, InputValue};
use crate::context::CachedValues;

/// Called with the typed value after a successful validation
pub type ProcessHook = Box<dyn FnMut(&InputValue)>;
/// Called with the restored raw value after a reset
pub type ResetHook = Box<dyn FnMut(&str)>;
/// Called with the field's error state after every validation
pub type ErrorHook = Box<dyn FnMut(Option<&FieldError>)>;

/// Configuration of an input registered with a form manager
///
/// Hooks run while the owning form manager is borrowed and must not call
/// back into it. A handle dropped inside a hook is deregistered once the
/// borrow ends.
pub struct InputOptions {
    kind: InputKind,
    required: bool,
    default_raw_value: Option<String>,
    on_process: Option<ProcessHook>,
    on_reset: Option<ResetHook>,
    on_error: Option<ErrorHook>,
}

impl InputOptions {
    #[must_use]
    pub const fn new(kind: InputKind) -> Self {
        Self {
            kind,
            required: false,
            default_raw_value: None,
            on_process: None,
            on_reset: None,
            on_error: None,
        }
    }

    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Raw value restored on reset; defaults to the kind's default
    #[must_use]
    pub fn default_raw_value(mut self, raw: impl Into<String>) -> Self {
        self.default_raw_value = Some(raw.into());
        self
    }

    #[must_use]
    pub fn on_process(mut self, hook: impl FnMut(&InputValue) + 'static) -> Self {
        self.on_process = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn on_reset(mut self, hook: impl FnMut(&str) + 'static) -> Self {
        self.on_reset = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn on_error(mut self, hook: impl FnMut(Option<&FieldError>) + 'static) -> Self {
        self.on_error = Some(Box::new(hook));
        self
    }
}

impl fmt::Debug for InputOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputOptions")
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("default_raw_value", &self.default_raw_value)
            .finish_non_exhaustive()
    }
}

/// State of one named field
pub struct InputManager {
    name: String,
    kind: InputKind,
    required: bool,
    raw_value: String,
    default_raw_value: String,
    error: Option<FieldError>,
    on_process: Option<ProcessHook>,
    on_reset: Option<ResetHook>,
    on_error: Option<ErrorHook>,
}

impl InputManager {
    /// Create an input seeded from `cached` if present, otherwise from its
    /// default raw value
    #[must_use]
    pub fn new(name: impl Into<String>, options: InputOptions, cached: Option<&str>) -> Self {
        let default_raw_value = options
            .default_raw_value
            .unwrap_or_else(|| options.kind.default_raw_value().to_string());
        let raw_value = cached.map_or_else(|| default_raw_value.clone(), ToString::to_string);

        Self {
            name: name.into(),
            kind: options.kind,
            required: options.required,
            raw_value,
            default_raw_value,
            error: None,
            on_process: options.on_process,
            on_reset: options.on_reset,
            on_error: options.on_error,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> InputKind {
        self.kind
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub fn raw_value(&self) -> &str {
        &self.raw_value
    }

    #[must_use]
    pub fn default_raw_value(&self) -> &str {
        &self.default_raw_value
    }

    /// Current error; `None` means valid or not yet validated
    #[must_use]
    pub const fn error(&self) -> Option<FieldError> {
        self.error
    }

    pub fn set_raw_value(&mut self, raw: impl Into<String>) {
        self.raw_value = raw.into();
    }

    /// Validate the raw value
    ///
    /// On success the typed value is passed to the process hook and the raw
    /// value is written to `cached` under this field's name.
    pub fn validate(&mut self, cached: &mut CachedValues) -> bool {
        let outcome = {
            let trimmed = self.raw_value.trim();
            self.kind
                .check(trimmed, self.required)
                .map(|()| self.kind.parse(trimmed))
        };

        match outcome {
            Ok(value) => {
                self.error = None;
                if let Some(hook) = self.on_error.as_mut() {
                    hook(None);
                }
                if let Some(hook) = self.on_process.as_mut() {
                    hook(&value);
                }

                cached.insert(self.name.clone(), self.raw_value.clone());
                trace!(input = %self.name, raw = %self.raw_value, "input validated");
                true
            }
            Err(error) => {
                self.error = Some(error);
                if let Some(hook) = self.on_error.as_mut() {
                    hook(Some(&error));
                }

                debug!(input = %self.name, %error, "input invalid");
                false
            }
        }
    }

    /// Restore the default raw value and clear the error
    pub fn reset(&mut self) {
        self.raw_value.clone_from(&self.default_raw_value);
        self.error = None;

        if let Some(hook) = self.on_reset.as_mut() {
            hook(&self.raw_value);
        }
    }

    /// Typed value
    ///
    /// # Errors
    ///
    /// Returns `FormError::ValueUnavailable` if the field has an error or its
    /// raw value does not pass the checks for its kind.
    pub fn value(&self) -> Result<InputValue> {
        if self.error.is_some() {
            return Err(FormError::ValueUnavailable(self.name.clone()));
        }

        let trimmed = self.raw_value.trim();
        self.kind
            .check(trimmed, self.required)
            .map(|()| self.kind.parse(trimmed))
            .map_err(|_| FormError::ValueUnavailable(self.name.clone()))
    }
}

impl fmt::Debug for InputManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputManager")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("raw_value", &self.raw_value)
            .field("default_raw_value", &self.default_raw_value)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
