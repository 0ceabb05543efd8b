//! Keyforms - interactive forms over identification-key and string operations
//!
//! Forms are built from typed inputs registered with a form manager,
//! validated together on submit, and linked through a shared map of cached
//! values so a value entered or produced in one form pre-fills the next.

use thiserror::Error;

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod demo;
pub mod form;
pub mod locale;
pub mod logging;
pub mod toolkit;
pub mod ui;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum KeyformsError {
    /// Form registration or value access error
    #[error("Form error: {0}")]
    Form(#[from] form::FormError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Prompt failed
    #[error("Input error: {0}")]
    Input(#[from] ui::InputError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// No form at the given menu path
    #[error("Unknown form: {0}")]
    UnknownForm(String),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
