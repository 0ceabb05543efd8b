//! Aggregation of a form's inputs
//!
//! A [`FormManager`] owns the inputs of one mounted form in registration
//! order. Registering an input returns an [`InputHandle`]; dropping the
//! handle deregisters the input, so inputs of a dropped form can never take
//! part in a later form's validation.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

use serde::Serialize;
use tracing::{debug, trace};

use super::error::{FieldError, FormError, Result};
use super::input_manager::{InputManager, InputOptions};
use super::kind::InputValue;
use crate::context::CachedValues;

/// Result of processing a form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FormOutput {
    Single(String),
    Sequence(Vec<String>),
}

impl FormOutput {
    /// The single string, if this is not a sequence
    #[must_use]
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(s) => Some(s),
            Self::Sequence(_) => None,
        }
    }
}

impl From<String> for FormOutput {
    fn from(s: String) -> Self {
        Self::Single(s)
    }
}

impl From<Vec<String>> for FormOutput {
    fn from(strings: Vec<String>) -> Self {
        Self::Sequence(strings)
    }
}

#[derive(Debug, Default)]
struct Registry {
    inputs: Vec<InputManager>,
}

impl Registry {
    fn get(&self, name: &str) -> Option<&InputManager> {
        self.inputs.iter().find(|input| input.name() == name)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut InputManager> {
        self.inputs.iter_mut().find(|input| input.name() == name)
    }

    fn remove(&mut self, name: &str) -> bool {
        let before = self.inputs.len();
        self.inputs.retain(|input| input.name() != name);
        before != self.inputs.len()
    }

    fn remove_all(&mut self, names: impl IntoIterator<Item = String>) {
        for name in names {
            if self.remove(&name) {
                trace!(input = %name, "deferred deregistration applied");
            }
        }
    }
}

/// Registry plus the names of inputs whose handles were dropped while it was
/// borrowed; those are removed on the next access
#[derive(Debug, Default)]
struct Shared {
    registry: RefCell<Registry>,
    pending_removals: RefCell<Vec<String>>,
}

impl Shared {
    fn borrow(&self) -> Ref<'_, Registry> {
        if let Ok(mut registry) = self.registry.try_borrow_mut() {
            registry.remove_all(self.take_pending());
        }

        self.registry.borrow()
    }

    fn borrow_mut(&self) -> RefMut<'_, Registry> {
        let mut registry = self.registry.borrow_mut();
        registry.remove_all(self.take_pending());
        registry
    }

    fn take_pending(&self) -> Vec<String> {
        std::mem::take(&mut *self.pending_removals.borrow_mut())
    }

    fn deregister(&self, name: &str) {
        match self.registry.try_borrow_mut() {
            Ok(mut registry) => {
                if registry.remove(name) {
                    trace!(input = name, "input deregistered");
                }
            }
            Err(_) => {
                debug!(input = name, "registry busy, deregistration deferred");
                self.pending_removals.borrow_mut().push(name.to_string());
            }
        }
    }
}

/// Manager of the inputs of one form instance
#[derive(Debug, Default)]
pub struct FormManager {
    registry: Rc<Shared>,
    result_name: Option<String>,
}

impl FormManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager whose single-string results are cached under
    /// `result_name`
    #[must_use]
    pub fn with_result_name(result_name: impl Into<String>) -> Self {
        Self {
            registry: Rc::default(),
            result_name: Some(result_name.into()),
        }
    }

    #[must_use]
    pub fn result_name(&self) -> Option<&str> {
        self.result_name.as_deref()
    }

    /// Register an input seeded from the cached value for `name`
    ///
    /// # Errors
    ///
    /// Returns `FormError::DuplicateInput` if `name` is already registered.
    pub fn add_input(
        &self,
        name: &str,
        options: InputOptions,
        cached: &CachedValues,
    ) -> Result<InputHandle> {
        let mut registry = self.registry.borrow_mut();

        if registry.get(name).is_some() {
            return Err(FormError::DuplicateInput(name.to_string()));
        }

        registry
            .inputs
            .push(InputManager::new(name, options, cached.get(name)));
        trace!(input = name, "input registered");

        Ok(InputHandle {
            registry: Rc::downgrade(&self.registry),
            name: name.to_string(),
        })
    }

    /// Deregister an input; no-op if absent
    pub fn remove_input(&self, name: &str) {
        if self.registry.borrow_mut().remove(name) {
            trace!(input = name, "input deregistered");
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.registry.borrow().get(name).is_some()
    }

    /// Registered input names in registration order
    #[must_use]
    pub fn input_names(&self) -> Vec<String> {
        self.registry
            .borrow()
            .inputs
            .iter()
            .map(|input| input.name().to_string())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.borrow().inputs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn raw_value(&self, name: &str) -> Option<String> {
        self.registry
            .borrow()
            .get(name)
            .map(|input| input.raw_value().to_string())
    }

    #[must_use]
    pub fn error(&self, name: &str) -> Option<FieldError> {
        self.registry.borrow().get(name).and_then(InputManager::error)
    }

    /// Replace the raw value of an input
    ///
    /// # Errors
    ///
    /// Returns `FormError::UnknownInput` if `name` is not registered.
    pub fn set_raw_value(&self, name: &str, raw: impl Into<String>) -> Result<()> {
        self.registry
            .borrow_mut()
            .get_mut(name)
            .map(|input| input.set_raw_value(raw))
            .ok_or_else(|| FormError::UnknownInput(name.to_string()))
    }

    /// True if no input currently has an error
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.registry
            .borrow()
            .inputs
            .iter()
            .all(|input| input.error().is_none())
    }

    /// Validate every input and, if all are valid, run `on_process`
    ///
    /// Every input is validated even after one fails. Returns `Ok(None)`
    /// without calling `on_process` if any input is invalid. If a result name
    /// is configured, a single-string result is cached under it and any other
    /// successful outcome removes the cached value; an error leaves the cache
    /// untouched.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `on_process`.
    pub fn process<E>(
        &self,
        cached: &mut CachedValues,
        on_process: impl FnOnce(&ValidatedInputs) -> std::result::Result<Option<FormOutput>, E>,
    ) -> std::result::Result<Option<FormOutput>, E> {
        let validated = {
            let mut registry = self.registry.borrow_mut();
            let mut valid = true;

            for input in &mut registry.inputs {
                valid &= input.validate(cached);
            }
            registry.remove_all(self.registry.take_pending());

            if !valid {
                debug!("form has invalid inputs");
                return Ok(None);
            }

            registry
                .inputs
                .iter()
                .filter_map(|input| {
                    input
                        .value()
                        .ok()
                        .map(|value| (input.name().to_string(), value))
                })
                .collect::<ValidatedInputs>()
        };

        let output = on_process(&validated)?;

        if let Some(result_name) = &self.result_name {
            match output.as_ref().and_then(FormOutput::as_single) {
                Some(single) => {
                    cached.insert(result_name.clone(), single.to_string());
                    trace!(result_name = %result_name, "result cached");
                }
                None => {
                    cached.remove(result_name);
                }
            }
        }

        Ok(output)
    }

    /// Reset every input to its default without deregistering it
    pub fn reset(&self) {
        for input in &mut self.registry.borrow_mut().inputs {
            input.reset();
        }
    }
}

/// Registration of one input; dropping it deregisters the input
#[must_use = "dropping the handle deregisters the input"]
#[derive(Debug)]
pub struct InputHandle {
    registry: Weak<Shared>,
    name: String,
}

impl InputHandle {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn raw_value(&self) -> Option<String> {
        self.registry.upgrade().and_then(|registry| {
            registry
                .borrow()
                .get(&self.name)
                .map(|input| input.raw_value().to_string())
        })
    }

    #[must_use]
    pub fn error(&self) -> Option<FieldError> {
        self.registry
            .upgrade()
            .and_then(|registry| registry.borrow().get(&self.name).and_then(InputManager::error))
    }

    /// Replace the raw value of the input
    ///
    /// # Errors
    ///
    /// Returns `FormError::UnknownInput` if the form manager is gone.
    pub fn set_raw_value(&self, raw: impl Into<String>) -> Result<()> {
        let registry = self
            .registry
            .upgrade()
            .ok_or_else(|| FormError::UnknownInput(self.name.clone()))?;
        let mut registry = registry.borrow_mut();

        registry
            .get_mut(&self.name)
            .map(|input| input.set_raw_value(raw))
            .ok_or_else(|| FormError::UnknownInput(self.name.clone()))
    }
}

impl Drop for InputHandle {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.deregister(&self.name);
        }
    }
}

/// Typed values of a form whose inputs all validated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedInputs {
    values: Vec<(String, InputValue)>,
}

impl FromIterator<(String, InputValue)> for ValidatedInputs {
    fn from_iter<I: IntoIterator<Item = (String, InputValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl ValidatedInputs {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&InputValue> {
        self.values
            .iter()
            .find(|(input, _)| input == name)
            .map(|(_, value)| value)
    }

    fn require(&self, name: &str) -> Result<&InputValue> {
        self.get(name)
            .ok_or_else(|| FormError::UnknownInput(name.to_string()))
    }

    fn mismatch(name: &str, expected: &'static str) -> FormError {
        FormError::KindMismatch {
            name: name.to_string(),
            expected,
        }
    }

    /// # Errors
    ///
    /// Returns `FormError::UnknownInput` or `FormError::KindMismatch`.
    pub fn text(&self, name: &str) -> Result<&str> {
        match self.require(name)? {
            InputValue::Text(s) => Ok(s),
            _ => Err(Self::mismatch(name, "string")),
        }
    }

    /// # Errors
    ///
    /// Returns `FormError::NumberOutOfRange` if the digits exceed `u64`,
    /// otherwise as [`Self::text`].
    pub fn optional_number(&self, name: &str) -> Result<Option<u64>> {
        match self.require(name)? {
            InputValue::Number(None) => Ok(None),
            InputValue::Number(Some(digits)) => {
                digits
                    .parse()
                    .map(Some)
                    .map_err(|_| FormError::NumberOutOfRange {
                        name: name.to_string(),
                        value: digits.clone(),
                    })
            }
            _ => Err(Self::mismatch(name, "number")),
        }
    }

    /// # Errors
    ///
    /// Returns `FormError::ValueUnavailable` if the number is empty,
    /// otherwise as [`Self::optional_number`].
    pub fn number(&self, name: &str) -> Result<u64> {
        self.optional_number(name)?
            .ok_or_else(|| FormError::ValueUnavailable(name.to_string()))
    }

    /// # Errors
    ///
    /// Returns `FormError::UnknownInput` or `FormError::KindMismatch`.
    pub fn boolean(&self, name: &str) -> Result<bool> {
        match self.require(name)? {
            InputValue::Boolean(b) => Ok(*b),
            _ => Err(Self::mismatch(name, "boolean")),
        }
    }

    /// Number converted to an enumeration
    ///
    /// # Errors
    ///
    /// Returns `FormError::NotAllowed` if the conversion fails, otherwise as
    /// [`Self::number`].
    pub fn enumeration<T: TryFrom<u64>>(&self, name: &str) -> Result<T> {
        let value = self.number(name)?;

        T::try_from(value).map_err(|_| FormError::NotAllowed {
            name: name.to_string(),
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::kind::InputKind;

    fn number(required: bool) -> InputOptions {
        InputOptions::new(InputKind::Number).required(required)
    }

    #[test]
    fn test_duplicate_registration() {
        let cached = CachedValues::default();
        let manager = FormManager::new();
        let _length = manager.add_input("length", number(true), &cached).unwrap();

        assert_eq!(
            manager.add_input("length", number(true), &cached).unwrap_err(),
            FormError::DuplicateInput("length".into())
        );
    }

    #[test]
    fn test_handle_drop_deregisters() {
        let cached = CachedValues::default();
        let manager = FormManager::new();
        let handle = manager.add_input("value", number(true), &cached).unwrap();
        assert!(manager.contains("value"));

        drop(handle);
        assert!(!manager.contains("value"));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_handle_dropped_during_validation_is_deregistered() {
        let mut cached = CachedValues::default();
        let manager = FormManager::new();
        let slot: Rc<RefCell<Option<InputHandle>>> = Rc::default();

        let hook_slot = Rc::clone(&slot);
        let _first = manager
            .add_input(
                "first",
                number(false).on_process(move |_| {
                    hook_slot.borrow_mut().take();
                }),
                &cached,
            )
            .unwrap();
        *slot.borrow_mut() = Some(manager.add_input("second", number(false), &cached).unwrap());

        let output = manager
            .process(&mut cached, |inputs| -> std::result::Result<_, FormError> {
                assert!(inputs.get("second").is_none());
                Ok(None)
            })
            .unwrap();

        assert!(output.is_none());
        assert!(slot.borrow().is_none());
        assert_eq!(manager.input_names(), vec!["first".to_string()]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let manager = FormManager::new();
        manager.remove_input("missing");
        assert!(manager.is_empty());
    }

    #[test]
    fn test_handle_outlives_manager() {
        let cached = CachedValues::default();
        let manager = FormManager::new();
        let handle = manager.add_input("s", InputOptions::new(InputKind::String), &cached).unwrap();

        drop(manager);
        assert_eq!(handle.raw_value(), None);
        assert!(handle.set_raw_value("x").is_err());
    }

    #[test]
    fn test_process_validates_all_without_short_circuit() {
        let mut cached = CachedValues::default();
        let manager = FormManager::new();
        let _a = manager.add_input("a", number(true), &cached).unwrap();
        let _b = manager.add_input("b", number(false), &cached).unwrap();
        manager.set_raw_value("b", "1x").unwrap();

        let mut called = false;
        let output = manager
            .process(&mut cached, |_| {
                called = true;
                Ok::<_, FormError>(None)
            })
            .unwrap();

        assert!(!called);
        assert_eq!(output, None);
        assert_eq!(manager.error("a"), Some(FieldError::Required));
        assert_eq!(manager.error("b"), Some(FieldError::NotANumber));
        assert!(!manager.is_valid());
    }

    #[test]
    fn test_process_caches_single_result() {
        let mut cached = CachedValues::default();
        let manager = FormManager::with_result_name("identificationKey");
        let _v = manager.add_input("value", number(true), &cached).unwrap();
        manager.set_raw_value("value", "1").unwrap();

        let output = manager
            .process(&mut cached, |inputs| {
                Ok::<_, FormError>(Some(FormOutput::Single(format!("key{}", inputs.number("value")?))))
            })
            .unwrap();

        assert_eq!(output, Some(FormOutput::Single("key1".into())));
        assert_eq!(cached.get("identificationKey"), Some("key1"));
        assert_eq!(cached.get("value"), Some("1"));
    }

    #[test]
    fn test_process_sequence_removes_stale_result() {
        let mut cached = CachedValues::default();
        cached.insert("identificationKey", "stale");
        let manager = FormManager::with_result_name("identificationKey");

        manager
            .process(&mut cached, |_| {
                Ok::<_, FormError>(Some(FormOutput::Sequence(vec!["a".into(), "b".into()])))
            })
            .unwrap();

        assert_eq!(cached.get("identificationKey"), None);
    }

    #[test]
    fn test_process_error_leaves_cache() {
        let mut cached = CachedValues::default();
        cached.insert("s", "kept");
        let manager = FormManager::with_result_name("s");

        let outcome = manager.process(&mut cached, |_| Err::<Option<FormOutput>, _>("boom"));

        assert_eq!(outcome, Err("boom"));
        assert_eq!(cached.get("s"), Some("kept"));
    }

    #[test]
    fn test_reset_twice_is_idempotent() {
        let mut cached = CachedValues::default();
        cached.insert("count", "5");
        let manager = FormManager::new();
        let _count = manager.add_input("count", number(true), &cached).unwrap();
        manager.set_raw_value("count", "x").unwrap();
        let _ = manager.process(&mut cached, |_| Ok::<_, FormError>(None));

        manager.reset();
        let once = (manager.raw_value("count"), manager.error("count"));
        manager.reset();
        let twice = (manager.raw_value("count"), manager.error("count"));

        assert_eq!(once, (Some(String::new()), None));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_validated_inputs_getters() {
        let inputs: ValidatedInputs = [
            ("s".to_string(), InputValue::Text("abc".into())),
            ("n".to_string(), InputValue::Number(Some("42".into()))),
            ("o".to_string(), InputValue::Number(None)),
            ("big".to_string(), InputValue::Number(Some("99999999999999999999999".into()))),
            ("b".to_string(), InputValue::Boolean(true)),
        ]
        .into_iter()
        .collect();

        assert_eq!(inputs.text("s").unwrap(), "abc");
        assert_eq!(inputs.number("n").unwrap(), 42);
        assert_eq!(inputs.optional_number("o").unwrap(), None);
        assert!(matches!(inputs.number("o"), Err(FormError::ValueUnavailable(_))));
        assert!(matches!(inputs.number("big"), Err(FormError::NumberOutOfRange { .. })));
        assert!(inputs.boolean("b").unwrap());
        assert!(matches!(inputs.text("n"), Err(FormError::KindMismatch { .. })));
        assert!(matches!(inputs.text("zz"), Err(FormError::UnknownInput(_))));
    }

    #[test]
    fn test_enumeration_conversion() {
        let inputs: ValidatedInputs = [("e".to_string(), InputValue::Number(Some("300".into())))]
            .into_iter()
            .collect();

        assert!(matches!(inputs.enumeration::<u8>("e"), Err(FormError::NotAllowed { .. })));
        assert_eq!(inputs.enumeration::<u16>("e").unwrap(), 300);
    }
}
