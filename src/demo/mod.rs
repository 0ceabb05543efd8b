//! Demo forms over the toolkit
//!
//! Forms are grouped into menus: the String menu has one sub-menu per
//! character set, the GS1 ID Key menu one per identification key type.
//! Each form is built with [`FormBuilder`] and processed with an explicit
//! [`FormEnv`] supplying the prompt used for bulk confirmation.

mod base;
mod confirm;
mod error;
mod gs1;
mod menu;
mod string;

pub use base::{BaseForm, DemoForm, FormBuilder, FormEnv, FormState, FormView, ProcessFn};
pub use confirm::{DEFAULT_CONFIRM_THRESHOLD, confirm_create_strings, confirmed};
pub use error::ProcessError;
pub use menu::{EntryView, Entries, FormDescriptor, FormPath, Menu, MenuTree, Menus, SubMenu, slug};
pub use string::StringProperties;
