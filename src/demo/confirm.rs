//! Confirmation gate for bulk creation

use tracing::debug;

use super::base::FormEnv;
use super::error::ProcessError;
use crate::locale::t_with;

/// Counts above this need confirmation unless configured otherwise
pub const DEFAULT_CONFIRM_THRESHOLD: u64 = 1000;

/// Ask before creating `count` strings
///
/// Counts up to the threshold pass without asking. Declining or cancelling
/// is not an error.
///
/// # Errors
///
/// Returns `ProcessError::Unexpected` if the prompt itself fails.
pub fn confirm_create_strings(env: &FormEnv<'_>, count: u64) -> Result<bool, ProcessError> {
    if count <= env.confirm_threshold {
        return Ok(true);
    }

    let prompt = t_with("Demo.confirmCreateStrings", &[("count", &count.to_string())]);
    let confirmed = env.input.prompt_confirm(&prompt, false)? == Some(true);

    if !confirmed {
        debug!(count, "bulk creation declined");
    }

    Ok(confirmed)
}

/// Run `create` only if [`confirm_create_strings`] agrees
///
/// # Errors
///
/// Propagates the prompt error or the error of `create`.
pub fn confirmed<T>(
    env: &FormEnv<'_>,
    count: u64,
    create: impl FnOnce() -> Result<T, ProcessError>,
) -> Result<Option<T>, ProcessError> {
    if confirm_create_strings(env, count)? {
        create().map(Some)
    } else {
        Ok(None)
    }
}
