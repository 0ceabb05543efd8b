//! Typed input components
//!
//! Each component registers one named input with a [`FormManager`] when
//! mounted and deregisters it when dropped.

use serde::Serialize;

use super::error::{FieldError, FormError, Result};
use super::form_manager::{FormManager, InputHandle};
use super::input_manager::InputOptions;
use super::kind::InputKind;
use crate::context::CachedValues;
use crate::locale::LocaleText;

/// How a field is presented
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Control {
    /// Free text or digits
    Text {
        value: String,
        number: bool,
        required: bool,
    },
    /// One mutually exclusive choice per allowed value
    Choice {
        options: Vec<ChoiceOption>,
        selected: u64,
    },
    /// Fixed value with no user choice
    Hidden { value: String },
    /// Single on/off toggle
    Toggle { checked: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub value: u64,
    pub name: String,
}

/// Snapshot of a field for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputView {
    pub name: String,
    pub label: Option<String>,
    pub hint: Option<String>,
    pub control: Control,
    pub error: Option<String>,
}

impl InputView {
    /// Whether the field is shown to the user
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        !matches!(self.control, Control::Hidden { .. })
    }
}

/// Configuration of a text input
#[derive(Debug, Clone)]
pub struct TextInputConfig {
    name: &'static str,
    kind: InputKind,
    required: bool,
    label: Option<LocaleText>,
    hint: Option<LocaleText>,
}

impl TextInputConfig {
    #[must_use]
    pub const fn string(name: &'static str) -> Self {
        Self::new(name, InputKind::String)
    }

    #[must_use]
    pub const fn number(name: &'static str) -> Self {
        Self::new(name, InputKind::Number)
    }

    const fn new(name: &'static str, kind: InputKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            label: None,
            hint: None,
        }
    }

    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn label(mut self, label: LocaleText) -> Self {
        self.label = Some(label);
        self
    }

    #[must_use]
    pub fn hint(mut self, hint: LocaleText) -> Self {
        self.hint = Some(hint);
        self
    }
}

/// String or number text input
#[derive(Debug)]
pub struct TextInput {
    handle: InputHandle,
    kind: InputKind,
    required: bool,
    label: Option<LocaleText>,
    hint: Option<LocaleText>,
}

impl TextInput {
    /// Register with `manager`, seeded from `cached`
    ///
    /// # Errors
    ///
    /// Returns `FormError::DuplicateInput` if the name is already registered.
    pub fn mount(manager: &FormManager, cached: &CachedValues, config: TextInputConfig) -> Result<Self> {
        let handle = manager.add_input(
            config.name,
            InputOptions::new(config.kind).required(config.required),
            cached,
        )?;

        Ok(Self {
            handle,
            kind: config.kind,
            required: config.required,
            label: config.label,
            hint: config.hint,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.handle.name()
    }

    #[must_use]
    pub fn is_number(&self) -> bool {
        self.kind == InputKind::Number
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub fn value(&self) -> String {
        self.handle.raw_value().unwrap_or_default()
    }

    /// # Errors
    ///
    /// Returns `FormError::UnknownInput` if the form manager is gone.
    pub fn set_value(&self, raw: impl Into<String>) -> Result<()> {
        self.handle.set_raw_value(raw)
    }

    #[must_use]
    pub fn error(&self) -> Option<FieldError> {
        self.handle.error()
    }

    #[must_use]
    pub fn view(&self) -> InputView {
        InputView {
            name: self.name().to_string(),
            label: self.label.as_ref().map(LocaleText::resolve),
            hint: self.hint.as_ref().map(LocaleText::resolve),
            control: Control::Text {
                value: self.value(),
                number: self.is_number(),
                required: self.required,
            },
            error: self.error().map(|error| error.to_string()),
        }
    }
}

/// Configuration of an enumeration input
#[derive(Debug, Clone)]
pub struct EnumInputConfig {
    name: &'static str,
    label: Option<LocaleText>,
    hint: Option<LocaleText>,
    values: Vec<u64>,
    names: Vec<LocaleText>,
}

impl EnumInputConfig {
    /// `names` is indexed by value, not by position in `values`
    #[must_use]
    pub fn new(name: &'static str, values: Vec<u64>, names: Vec<LocaleText>) -> Self {
        Self {
            name,
            label: None,
            hint: None,
            values,
            names,
        }
    }

    #[must_use]
    pub fn label(mut self, label: LocaleText) -> Self {
        self.label = Some(label);
        self
    }

    #[must_use]
    pub fn hint(mut self, hint: LocaleText) -> Self {
        self.hint = Some(hint);
        self
    }
}

/// Required numeric input restricted to a set of values
#[derive(Debug)]
pub struct EnumInput {
    handle: InputHandle,
    label: Option<LocaleText>,
    hint: Option<LocaleText>,
    values: Vec<u64>,
    names: Vec<LocaleText>,
}

impl EnumInput {
    /// Register with `manager`
    ///
    /// A cached value outside the allowed values falls back to the first
    /// allowed value.
    ///
    /// # Errors
    ///
    /// Returns `FormError::NotAllowed` if no values are allowed,
    /// `FormError::DuplicateInput` if the name is already registered.
    pub fn mount(manager: &FormManager, cached: &CachedValues, config: EnumInputConfig) -> Result<Self> {
        let Some(&first) = config.values.first() else {
            return Err(FormError::NotAllowed {
                name: config.name.to_string(),
                value: String::new(),
            });
        };

        let initial = cached
            .get(config.name)
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|value| config.values.contains(value))
            .unwrap_or(first);

        let handle = manager.add_input(
            config.name,
            InputOptions::new(InputKind::Number)
                .required(true)
                .default_raw_value(first.to_string()),
            cached,
        )?;
        handle.set_raw_value(initial.to_string())?;

        Ok(Self {
            handle,
            label: config.label,
            hint: config.hint,
            values: config.values,
            names: config.names,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.handle.name()
    }

    #[must_use]
    pub fn values(&self) -> &[u64] {
        &self.values
    }

    /// Hidden if only one value is allowed
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.values.len() == 1
    }

    /// Currently selected value
    #[must_use]
    pub fn selected(&self) -> u64 {
        self.handle
            .raw_value()
            .and_then(|raw| raw.trim().parse().ok())
            .filter(|value| self.values.contains(value))
            .or_else(|| self.values.first().copied())
            .unwrap_or_default()
    }

    /// # Errors
    ///
    /// Returns `FormError::NotAllowed` if `value` is not allowed.
    pub fn select(&self, value: u64) -> Result<()> {
        if !self.values.contains(&value) {
            return Err(FormError::NotAllowed {
                name: self.name().to_string(),
                value: value.to_string(),
            });
        }

        self.handle.set_raw_value(value.to_string())
    }

    /// Display name of `value`
    #[must_use]
    pub fn value_name(&self, value: u64) -> String {
        usize::try_from(value)
            .ok()
            .and_then(|index| self.names.get(index))
            .map_or_else(|| value.to_string(), LocaleText::resolve)
    }

    #[must_use]
    pub fn options(&self) -> Vec<ChoiceOption> {
        self.values
            .iter()
            .map(|&value| ChoiceOption {
                value,
                name: self.value_name(value),
            })
            .collect()
    }

    #[must_use]
    pub fn view(&self) -> InputView {
        let control = if self.is_hidden() {
            Control::Hidden {
                value: self.selected().to_string(),
            }
        } else {
            Control::Choice {
                options: self.options(),
                selected: self.selected(),
            }
        };

        InputView {
            name: self.name().to_string(),
            label: self.label.as_ref().map(LocaleText::resolve),
            hint: self.hint.as_ref().map(LocaleText::resolve),
            control,
            error: self.handle.error().map(|error| error.to_string()),
        }
    }
}

/// Configuration of a boolean input
#[derive(Debug, Clone)]
pub struct BooleanInputConfig {
    name: &'static str,
    label: Option<LocaleText>,
    hint: Option<LocaleText>,
}

impl BooleanInputConfig {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            label: None,
            hint: None,
        }
    }

    #[must_use]
    pub fn label(mut self, label: LocaleText) -> Self {
        self.label = Some(label);
        self
    }

    #[must_use]
    pub fn hint(mut self, hint: LocaleText) -> Self {
        self.hint = Some(hint);
        self
    }
}

/// Required boolean toggle
#[derive(Debug)]
pub struct BooleanInput {
    handle: InputHandle,
    label: Option<LocaleText>,
    hint: Option<LocaleText>,
}

impl BooleanInput {
    /// Register with `manager`; checked only if the cached value is "true"
    ///
    /// # Errors
    ///
    /// Returns `FormError::DuplicateInput` if the name is already registered.
    pub fn mount(manager: &FormManager, cached: &CachedValues, config: BooleanInputConfig) -> Result<Self> {
        let checked = cached.get(config.name) == Some("true");

        let handle = manager.add_input(
            config.name,
            InputOptions::new(InputKind::Boolean).required(true),
            cached,
        )?;
        handle.set_raw_value(checked.to_string())?;

        Ok(Self {
            handle,
            label: config.label,
            hint: config.hint,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.handle.name()
    }

    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.handle.raw_value().as_deref() == Some("true")
    }

    /// # Errors
    ///
    /// Returns `FormError::UnknownInput` if the form manager is gone.
    pub fn set_checked(&self, checked: bool) -> Result<()> {
        self.handle.set_raw_value(checked.to_string())
    }

    #[must_use]
    pub fn view(&self) -> InputView {
        InputView {
            name: self.name().to_string(),
            label: self.label.as_ref().map(LocaleText::resolve),
            hint: self.hint.as_ref().map(LocaleText::resolve),
            control: Control::Toggle {
                checked: self.is_checked(),
            },
            error: self.handle.error().map(|error| error.to_string()),
        }
    }
}

/// Any mounted input component
#[derive(Debug)]
pub enum Field {
    Text(TextInput),
    Enum(EnumInput),
    Boolean(BooleanInput),
}

impl Field {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Text(input) => input.name(),
            Self::Enum(input) => input.name(),
            Self::Boolean(input) => input.name(),
        }
    }

    #[must_use]
    pub fn view(&self) -> InputView {
        match self {
            Self::Text(input) => input.view(),
            Self::Enum(input) => input.view(),
            Self::Boolean(input) => input.view(),
        }
    }
}
