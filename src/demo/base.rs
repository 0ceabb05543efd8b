//! Base form: title, fields, submit/reset and result state

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;
use tracing::{debug, info};

use super::error::ProcessError;
use crate::context::CachedValues;
use crate::form::{
    BooleanInput, BooleanInputConfig, EnumInput, EnumInputConfig, Field, FormError, FormManager,
    FormOutput, InputView, TextInput, TextInputConfig, ValidatedInputs,
};
use crate::locale::{LocaleText, t};
use crate::ui::UserInput;

/// What a process callback may use besides its validated inputs
#[derive(Clone, Copy)]
pub struct FormEnv<'a> {
    pub input: &'a dyn UserInput,
    /// Bulk creations above this count need confirmation
    pub confirm_threshold: u64,
}

impl<'a> FormEnv<'a> {
    #[must_use]
    pub const fn new(input: &'a dyn UserInput, confirm_threshold: u64) -> Self {
        Self {
            input,
            confirm_threshold,
        }
    }
}

impl fmt::Debug for FormEnv<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormEnv")
            .field("confirm_threshold", &self.confirm_threshold)
            .finish_non_exhaustive()
    }
}

/// Outcome of the last submit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormState {
    pub error: Option<String>,
    pub result: Option<FormOutput>,
}

impl FormState {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.error.is_none() && self.result.is_none()
    }
}

/// Snapshot of a form for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub title: String,
    pub subtitle: String,
    pub fields: Vec<InputView>,
    pub submit_label: String,
    pub reset_label: String,
    pub error: Option<String>,
    pub result: Option<FormOutput>,
}

/// Mounted fields of one form plus its display state
#[derive(Debug)]
pub struct BaseForm {
    title: LocaleText,
    subtitle: LocaleText,
    manager: FormManager,
    fields: Vec<Field>,
    state: FormState,
}

impl BaseForm {
    #[must_use]
    pub const fn title(&self) -> &LocaleText {
        &self.title
    }

    #[must_use]
    pub const fn subtitle(&self) -> &LocaleText {
        &self.subtitle
    }

    #[must_use]
    pub const fn manager(&self) -> &FormManager {
        &self.manager
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[must_use]
    pub const fn state(&self) -> &FormState {
        &self.state
    }

    /// Validate every field and run `on_process` if all are valid
    ///
    /// A returned error or a panic inside `on_process` is stored as the
    /// form-level error; the fields keep their values.
    pub fn submit(
        &mut self,
        cached: &mut CachedValues,
        on_process: impl FnOnce(&ValidatedInputs) -> Result<Option<FormOutput>, ProcessError>,
    ) -> &FormState {
        self.state = FormState::default();

        let manager = &self.manager;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| manager.process(cached, on_process)))
            .unwrap_or_else(|payload| Err(ProcessError::from_panic(payload.as_ref())));

        let title = self.title.resolve();
        let subtitle = self.subtitle.resolve();

        match outcome {
            Ok(Some(result)) => {
                info!(title = %title, subtitle = %subtitle, "form processed");
                self.state.result = Some(result);
            }
            Ok(None) => debug!(title = %title, subtitle = %subtitle, "no result"),
            Err(e) => {
                e.log(&title, &subtitle);
                self.state.error = Some(e.to_string());
            }
        }

        &self.state
    }

    /// Reset every field and clear the displayed result and error
    pub fn reset(&mut self) {
        self.manager.reset();
        self.state = FormState::default();
    }

    #[must_use]
    pub fn view(&self) -> FormView {
        let subtitle = self.subtitle.resolve();

        FormView {
            title: self.title.resolve(),
            submit_label: subtitle.clone(),
            subtitle,
            fields: self.fields.iter().map(Field::view).collect(),
            reset_label: t("App.reset"),
            error: self.state.error.clone(),
            result: self.state.result.clone(),
        }
    }
}

/// Process callback of a demo form
pub type ProcessFn =
    Box<dyn Fn(&ValidatedInputs, &FormEnv<'_>) -> Result<Option<FormOutput>, ProcessError>>;

/// A base form bound to its process callback
pub struct DemoForm {
    base: BaseForm,
    process: ProcessFn,
}

impl DemoForm {
    #[must_use]
    pub const fn title(&self) -> &LocaleText {
        self.base.title()
    }

    #[must_use]
    pub const fn subtitle(&self) -> &LocaleText {
        self.base.subtitle()
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        self.base.fields()
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.base.fields().iter().find(|field| field.name() == name)
    }

    #[must_use]
    pub const fn manager(&self) -> &FormManager {
        self.base.manager()
    }

    #[must_use]
    pub const fn state(&self) -> &FormState {
        self.base.state()
    }

    /// Edit a field from its raw text
    ///
    /// Enumeration fields take the numeric value and boolean fields take
    /// "true" or "false".
    ///
    /// # Errors
    ///
    /// Returns `FormError::UnknownInput` if no field has that name and
    /// `FormError::NotAllowed` for values an enumeration or toggle can't take.
    pub fn set_value(&self, name: &str, raw: &str) -> Result<(), FormError> {
        let not_allowed = || FormError::NotAllowed {
            name: name.to_string(),
            value: raw.to_string(),
        };

        match self.field(name) {
            Some(Field::Text(input)) => input.set_value(raw),
            Some(Field::Enum(input)) => input.select(raw.trim().parse().map_err(|_| not_allowed())?),
            Some(Field::Boolean(input)) => input.set_checked(raw.trim().parse().map_err(|_| not_allowed())?),
            None => Err(FormError::UnknownInput(name.to_string())),
        }
    }

    pub fn submit(&mut self, cached: &mut CachedValues, env: &FormEnv<'_>) -> &FormState {
        let process = &self.process;
        self.base.submit(cached, |inputs| process(inputs, env))
    }

    pub fn reset(&mut self) {
        self.base.reset();
    }

    #[must_use]
    pub fn view(&self) -> FormView {
        self.base.view()
    }
}

impl fmt::Debug for DemoForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DemoForm")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
enum FieldConfig {
    Text(TextInputConfig),
    Enum(EnumInputConfig),
    Boolean(BooleanInputConfig),
}

/// Declarative construction of a [`DemoForm`]
///
/// Fields mount in the order they are added.
#[derive(Debug)]
pub struct FormBuilder {
    title: LocaleText,
    subtitle: LocaleText,
    result_name: Option<&'static str>,
    fields: Vec<FieldConfig>,
}

impl FormBuilder {
    #[must_use]
    pub const fn new(title: LocaleText, subtitle: LocaleText) -> Self {
        Self {
            title,
            subtitle,
            result_name: None,
            fields: Vec::new(),
        }
    }

    /// Cache single-string results under `name`
    #[must_use]
    pub const fn result_name(mut self, name: &'static str) -> Self {
        self.result_name = Some(name);
        self
    }

    #[must_use]
    pub fn text(mut self, config: TextInputConfig) -> Self {
        self.fields.push(FieldConfig::Text(config));
        self
    }

    #[must_use]
    pub fn enumeration(mut self, config: EnumInputConfig) -> Self {
        self.fields.push(FieldConfig::Enum(config));
        self
    }

    #[must_use]
    pub fn boolean(mut self, config: BooleanInputConfig) -> Self {
        self.fields.push(FieldConfig::Boolean(config));
        self
    }

    /// Mount every field seeded from `cached`
    ///
    /// # Errors
    ///
    /// Returns the first mount error; fields mounted so far are dropped.
    pub fn build(
        self,
        cached: &CachedValues,
        process: impl Fn(&ValidatedInputs, &FormEnv<'_>) -> Result<Option<FormOutput>, ProcessError>
        + 'static,
    ) -> Result<DemoForm, FormError> {
        let manager = self
            .result_name
            .map_or_else(FormManager::new, FormManager::with_result_name);

        let fields = self
            .fields
            .into_iter()
            .map(|config| match config {
                FieldConfig::Text(config) => TextInput::mount(&manager, cached, config).map(Field::Text),
                FieldConfig::Enum(config) => EnumInput::mount(&manager, cached, config).map(Field::Enum),
                FieldConfig::Boolean(config) => {
                    BooleanInput::mount(&manager, cached, config).map(Field::Boolean)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DemoForm {
            base: BaseForm {
                title: self.title,
                subtitle: self.subtitle,
                manager,
                fields,
                state: FormState::default(),
            },
            process: Box::new(process),
        })
    }
}
