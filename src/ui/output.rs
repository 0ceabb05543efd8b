//! Output abstraction layer
//!
//! Forms and the session write through [`OutputWriter`] so the terminal
//! writer can be swapped for a buffer in tests.

use colored::Colorize;
use std::sync::{Arc, Mutex, PoisonError};

/// Trait for output operations
///
/// # Examples
///
/// ```
/// use keyforms::ui::output::{OutputWriter, StdoutWriter};
///
/// let output = StdoutWriter::new();
/// output.write("Normal message");
/// output.success("✓ 0614141000012");
/// output.error("Value is required.");
/// ```
pub trait OutputWriter: Send + Sync {
    /// Write a normal message
    fn write(&self, message: &str);

    /// Write an error message
    fn error(&self, message: &str);

    /// Write a success message
    fn success(&self, message: &str);

    /// Write a warning message
    fn warning(&self, message: &str);

    /// Write an info message (dimmed/secondary)
    fn info(&self, message: &str);

    /// Write a heading
    fn heading(&self, message: &str);
}

/// Terminal implementation - writes to stdout/stderr
pub struct StdoutWriter;

impl StdoutWriter {
    /// Create a new stdout writer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for StdoutWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputWriter for StdoutWriter {
    fn write(&self, message: &str) {
        println!("{message}");
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", "❌".red(), message.red());
    }

    fn success(&self, message: &str) {
        println!("{}", message.green());
    }

    fn warning(&self, message: &str) {
        println!("{} {}", "⚠️".yellow(), message);
    }

    fn info(&self, message: &str) {
        println!("{}", message.dimmed());
    }

    fn heading(&self, message: &str) {
        println!("{}", message.bold());
    }
}

/// Message level for categorizing output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Normal,
    Error,
    Success,
    Warning,
    Info,
    Heading,
}

/// Writer that keeps every message in memory
///
/// Clones share the same buffer.
///
/// # Examples
///
/// ```
/// use keyforms::ui::output::{MessageLevel, OutputWriter, BufferWriter};
///
/// let writer = BufferWriter::new();
/// writer.success("done");
/// assert_eq!(writer.messages(), vec![(MessageLevel::Success, "done".to_string())]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BufferWriter {
    messages: Arc<Mutex<Vec<(MessageLevel, String)>>>,
}

impl BufferWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages in write order
    #[must_use]
    pub fn messages(&self) -> Vec<(MessageLevel, String)> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Message text only, one entry per message
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .map(|(_, message)| message)
            .collect()
    }

    /// True if any message contains `needle`
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.messages()
            .iter()
            .any(|(_, message)| message.contains(needle))
    }

    pub fn clear(&self) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn add_message(&self, level: MessageLevel, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, message.to_string()));
    }
}

impl OutputWriter for BufferWriter {
    fn write(&self, message: &str) {
        self.add_message(MessageLevel::Normal, message);
    }

    fn error(&self, message: &str) {
        self.add_message(MessageLevel::Error, message);
    }

    fn success(&self, message: &str) {
        self.add_message(MessageLevel::Success, message);
    }

    fn warning(&self, message: &str) {
        self.add_message(MessageLevel::Warning, message);
    }

    fn info(&self, message: &str) {
        self.add_message(MessageLevel::Info, message);
    }

    fn heading(&self, message: &str) {
        self.add_message(MessageLevel::Heading, message);
    }
}
