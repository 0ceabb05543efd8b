//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI
//! args and writes through an [`OutputWriter`](crate::ui::OutputWriter).

pub mod completions;
pub mod config;
pub mod interactive;
pub mod menu;
pub mod run;

pub use completions::execute as completions;
pub use config::execute as config;
pub use interactive::execute as interactive;
pub use menu::execute as menu;
pub use run::execute as run;
