//! Interactive command - menu-driven form session

use crate::config::KeyformsConfig;
use crate::context::AppContext;
use crate::demo::Menus;
use crate::ui::{OutputWriter, Session, UserInput};
use crate::KeyformsError;

/// Run a session seeded with the configured initial values
///
/// # Errors
///
/// Returns `KeyformsError::Input` if a prompt fails.
pub fn execute(
    menus: &Menus,
    config: &KeyformsConfig,
    input: &dyn UserInput,
    output: &dyn OutputWriter,
) -> Result<(), KeyformsError> {
    let context = AppContext::new(config.initial_cached_values());

    Session::new(menus, context, input, output, config.confirm_threshold).run()
}
