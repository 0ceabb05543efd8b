//! Terminal UI layer
//!
//! Prompts and messages go through two traits so the session, the
//! confirmation gate and the commands run unchanged against a terminal, a
//! fixed answer or a script.
//!
//! # Core Traits
//!
//! - **`UserInput`** - User prompts (text input, confirmation, selection)
//! - **`OutputWriter`** - Status messages with severity levels
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │   Session / commands / confirmation     │
//! └────────────────┬────────────────────────┘
//!                  │ Uses traits
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │   UserInput          OutputWriter       │
//! └────────────────┬────────────────────────┘
//!                  │ Implemented by
//!         ┌────────┴────────┐
//!         ▼                 ▼
//! ┌───────────────┐  ┌───────────────────┐
//! │ Terminal      │  │ Unattended/tests  │
//! │ - Dialoguer   │  │ - AssumeYes/No    │
//! │ - Stdout      │  │ - MockInput       │
//! │               │  │ - BufferWriter    │
//! └───────────────┘  └───────────────────┘
//! ```
//!
//! ## Output Messages
//!
//! ```
//! use keyforms::ui::output::{OutputWriter, StdoutWriter};
//!
//! let output = StdoutWriter::new();
//! output.success("0614141000012");
//! output.error("Value is required.");
//! ```

pub mod input;
pub mod mock;
pub mod output;
pub mod render;
pub mod session;

pub use input::{AssumeNo, AssumeYes, DialoguerInput, InputError, UserInput};
pub use output::{BufferWriter, MessageLevel, OutputWriter, StdoutWriter};
pub use render::render;
pub use session::Session;
