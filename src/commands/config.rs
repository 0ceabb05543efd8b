//! Config command - show the configuration file and its contents

use std::path::PathBuf;

use crate::cli::ConfigCommands;
use crate::config::KeyformsConfig;
use crate::ui::OutputWriter;
use crate::KeyformsError;

type Result<T> = std::result::Result<T, KeyformsError>;

/// Execute a config subcommand
///
/// `path` is the file given with `--config`, if any.
///
/// # Errors
///
/// Returns `KeyformsError::Config` if the default path cannot be determined
/// or the configuration cannot be serialized.
pub fn execute(
    config: &KeyformsConfig,
    path: Option<PathBuf>,
    command: &ConfigCommands,
    output: &dyn OutputWriter,
) -> Result<()> {
    match command {
        ConfigCommands::Path => {
            let path = match path {
                Some(path) => path,
                None => KeyformsConfig::config_path()?,
            };
            output.write(&path.display().to_string());
        }
        ConfigCommands::Show => output.write(config.to_toml()?.trim_end()),
    }

    Ok(())
}
