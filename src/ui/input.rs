//! User input abstraction layer
//!
//! Prompts go through [`UserInput`] so the interactive session and the
//! confirmation gate can run against dialoguer, a fixed answer, or a script.

use std::io;

/// Trait for user input operations
///
/// Implemented by [`DialoguerInput`] for terminals, [`AssumeYes`] for
/// unattended runs and [`MockInput`](super::mock::MockInput) for scripts.
///
/// # Examples
///
/// ```no_run
/// use keyforms::ui::input::{UserInput, DialoguerInput};
///
/// let input = DialoguerInput::new();
///
/// if let Some(prefix) = input.prompt_text("Prefix", Some("952123"), false).unwrap() {
///     println!("Prefix {prefix}");
/// }
///
/// if let Some(true) = input.prompt_confirm("Create 5000 strings?", false).unwrap() {
///     println!("Creating...");
/// }
/// ```
pub trait UserInput: Send + Sync {
    /// Prompt user for text input
    ///
    /// # Arguments
    ///
    /// * `prompt` - The prompt message to display
    /// * `default` - Optional default value
    /// * `allow_empty` - Whether empty input is allowed
    ///
    /// # Returns
    ///
    /// * `Ok(Some(String))` - User entered text
    /// * `Ok(None)` - User cancelled (ESC)
    /// * `Err(_)` - Input operation failed
    fn prompt_text(
        &self,
        prompt: &str,
        default: Option<&str>,
        allow_empty: bool,
    ) -> Result<Option<String>>;

    /// Prompt user for confirmation (yes/no)
    ///
    /// # Arguments
    ///
    /// * `prompt` - The prompt message to display
    /// * `default` - Default selection (true = yes, false = no)
    ///
    /// # Returns
    ///
    /// * `Ok(Some(bool))` - User confirmed (true) or denied (false)
    /// * `Ok(None)` - User cancelled (ESC)
    /// * `Err(_)` - Input operation failed
    fn prompt_confirm(&self, prompt: &str, default: bool) -> Result<Option<bool>>;

    /// Prompt user to select from a list
    ///
    /// # Arguments
    ///
    /// * `prompt` - The prompt message to display
    /// * `items` - List of items to choose from
    /// * `default` - Optional default selection index
    ///
    /// # Returns
    ///
    /// * `Ok(Some(usize))` - Index of selected item
    /// * `Ok(None)` - User cancelled (ESC)
    /// * `Err(_)` - Input operation failed
    fn prompt_select(
        &self,
        prompt: &str,
        items: &[String],
        default: Option<usize>,
    ) -> Result<Option<usize>>;
}

/// Result type for user input operations
pub type Result<T> = std::result::Result<T, InputError>;

/// Errors that can occur during user input
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// IO error during input
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Input cancelled by user
    #[error("Input cancelled by user")]
    Cancelled,

    /// Invalid input provided
    #[error("Invalid input: {0}")]
    Invalid(String),
}

/// CLI-based user input using dialoguer
///
/// This implementation uses the `dialoguer` crate to provide interactive
/// prompts in a traditional command-line interface.
///
/// # Examples
///
/// ```no_run
/// use keyforms::ui::input::{UserInput, DialoguerInput};
///
/// let input = DialoguerInput::new();
/// let length = input.prompt_text("Length", Some("6"), false).unwrap();
/// ```
pub struct DialoguerInput {
    theme: dialoguer::theme::ColorfulTheme,
}

impl DialoguerInput {
    /// Create a new dialoguer-based input handler
    #[must_use]
    pub fn new() -> Self {
        Self {
            theme: dialoguer::theme::ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerInput {
    fn default() -> Self {
        Self::new()
    }
}

impl UserInput for DialoguerInput {
    fn prompt_text(
        &self,
        prompt: &str,
        default: Option<&str>,
        allow_empty: bool,
    ) -> Result<Option<String>> {
        use dialoguer::Input;

        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(allow_empty);

        if let Some(def) = default {
            input = input.default(def.to_string());
        }

        input
            .interact_text()
            .map(Some)
            .map_err(|e| InputError::Io(io::Error::other(e)))
    }

    fn prompt_confirm(&self, prompt: &str, default: bool) -> Result<Option<bool>> {
        use dialoguer::Confirm;

        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact_opt()
            .map_err(|e| InputError::Io(io::Error::other(e)))
    }

    fn prompt_select(
        &self,
        prompt: &str,
        items: &[String],
        default: Option<usize>,
    ) -> Result<Option<usize>> {
        use dialoguer::Select;

        let mut select = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items);

        if let Some(def) = default {
            select = select.default(def);
        }

        select
            .interact_opt()
            .map_err(|e| InputError::Io(io::Error::other(e)))
    }
}

/// Non-interactive input that accepts every default and confirms every
/// question
///
/// Used for `run --yes`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl UserInput for AssumeYes {
    fn prompt_text(
        &self,
        _prompt: &str,
        default: Option<&str>,
        _allow_empty: bool,
    ) -> Result<Option<String>> {
        Ok(default.map(ToString::to_string))
    }

    fn prompt_confirm(&self, _prompt: &str, _default: bool) -> Result<Option<bool>> {
        Ok(Some(true))
    }

    fn prompt_select(
        &self,
        _prompt: &str,
        items: &[String],
        default: Option<usize>,
    ) -> Result<Option<usize>> {
        Ok(default.or_else(|| (!items.is_empty()).then_some(0)))
    }
}

/// Non-interactive input that declines every question
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeNo;

impl UserInput for AssumeNo {
    fn prompt_text(
        &self,
        _prompt: &str,
        _default: Option<&str>,
        _allow_empty: bool,
    ) -> Result<Option<String>> {
        Ok(None)
    }

    fn prompt_confirm(&self, _prompt: &str, _default: bool) -> Result<Option<bool>> {
        Ok(Some(false))
    }

    fn prompt_select(
        &self,
        _prompt: &str,
        _items: &[String],
        _default: Option<usize>,
    ) -> Result<Option<usize>> {
        Ok(None)
    }
}
