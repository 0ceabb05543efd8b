//! Form input and validation management
//!
//! # Architecture
//!
//! ```text
//! TextInput / EnumInput / BooleanInput   (typed components)
//!        │ mount → InputHandle (drop deregisters)
//!        ▼
//! FormManager   (registration order, process, reset)
//!        │ owns
//!        ▼
//! InputManager  (raw value, default, error, hooks)
//! ```
//!
//! Values are seeded from and written back to [`CachedValues`], which the
//! caller passes in explicitly.
//!
//! [`CachedValues`]: crate::context::CachedValues

mod error;
mod form_manager;
mod input_manager;
mod inputs;
mod kind;

pub use error::{FieldError, FormError, Result};
pub use form_manager::{FormManager, FormOutput, InputHandle, ValidatedInputs};
pub use input_manager::{ErrorHook, InputManager, InputOptions, ProcessHook, ResetHook};
pub use inputs::{
    BooleanInput, BooleanInputConfig, ChoiceOption, Control, EnumInput, EnumInputConfig, Field,
    InputView, TextInput, TextInputConfig,
};
pub use kind::{InputKind, InputValue};
