//! Session-wide application state
//!
//! [`AppContext`] is created once per session and passed explicitly to every
//! form construction and submission. It owns the cached field values shared
//! by all forms and the currently displayed form.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::KeyformsError;
use crate::demo::{DemoForm, FormEnv, FormPath, FormState, Menus};

/// Last committed raw value per field name, shared across all forms
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CachedValues {
    values: HashMap<String, String>,
}

impl CachedValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Insert or replace; last write wins
    pub fn insert(&mut self, name: impl Into<String>, raw: impl Into<String>) {
        self.values.insert(name.into(), raw.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, raw)| (name.as_str(), raw.as_str()))
    }
}

impl From<HashMap<String, String>> for CachedValues {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CachedValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, raw)| (name.into(), raw.into()))
                .collect(),
        }
    }
}

/// The form currently on display and where it came from
#[derive(Debug)]
pub struct CurrentElement {
    pub path: FormPath,
    pub form: DemoForm,
}

/// Single-owner session state
#[derive(Debug, Default)]
pub struct AppContext {
    cached_values: CachedValues,
    current: Option<CurrentElement>,
}

impl AppContext {
    /// Create a context seeded with `initial` cached values
    #[must_use]
    pub const fn new(initial: CachedValues) -> Self {
        Self {
            cached_values: initial,
            current: None,
        }
    }

    #[must_use]
    pub const fn cached_values(&self) -> &CachedValues {
        &self.cached_values
    }

    pub const fn cached_values_mut(&mut self) -> &mut CachedValues {
        &mut self.cached_values
    }

    #[must_use]
    pub const fn current(&self) -> Option<&CurrentElement> {
        self.current.as_ref()
    }

    pub const fn current_mut(&mut self) -> Option<&mut CurrentElement> {
        self.current.as_mut()
    }

    /// Replace the current form with a freshly mounted one
    ///
    /// The previous form is dropped before the new one mounts, so it sees
    /// every value the previous form committed.
    ///
    /// # Errors
    ///
    /// Returns `KeyformsError::UnknownForm` if `path` names no form, or the
    /// mount error of the form. The current element is empty on error.
    pub fn select(&mut self, menus: &Menus, path: FormPath) -> Result<&mut CurrentElement, KeyformsError> {
        self.current = None;

        let form = menus.mount(path, &self.cached_values)?;
        debug!(path = %menus.describe(path), "form selected");

        Ok(self.current.insert(CurrentElement { path, form }))
    }

    /// Submit the current form
    ///
    /// Returns `None` if no form is displayed.
    pub fn submit(&mut self, env: &FormEnv<'_>) -> Option<&FormState> {
        let current = self.current.as_mut()?;
        Some(current.form.submit(&mut self.cached_values, env))
    }

    /// Reset the current form's fields
    pub fn reset_current(&mut self) {
        if let Some(current) = self.current.as_mut() {
            current.form.reset();
        }
    }

    /// Clear the cached values and the current element
    pub fn reset(&mut self) {
        self.current = None;
        self.cached_values.clear();
        info!("application context reset");
    }
}
