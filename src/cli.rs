//! Command-line interface definitions and parsing
//!
//! # Commands
//!
//! - **interactive**: Menu-driven form session (default)
//! - **menu**: Print the menu tree
//! - **run**: Fill in one form from the command line and submit it
//! - **completions**: Shell completion script
//! - **config**: Show the configuration file or its path
//!
//! # Examples
//!
//! ```
//! use clap::Parser;
//! use keyforms::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_from([
//!     "keyforms", "run", "gs1-id-key", "gtin", "create",
//!     "--set", "prefix=0614141", "--set", "value=1",
//! ]);
//!
//! if let Commands::Run(args) = cli.get_command() {
//!     assert_eq!(args.values().unwrap()[0], ("prefix".to_string(), "0614141".to_string()));
//! }
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::KeyformsError;

/// Arguments of the `run` command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RunArgs {
    /// Menu title or slug (e.g. "gs1-id-key")
    pub menu: String,

    /// Sub-menu title or slug (e.g. "gtin", "numeric")
    pub sub_menu: String,

    /// Form name or slug (e.g. "create-sequence")
    pub form: String,

    /// Field value (can specify multiple: --set prefix=0614141 --set value=1)
    #[arg(short = 's', long = "set", value_name = "NAME=VALUE")]
    pub set: Vec<String>,

    /// Answer yes to confirmation prompts
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,

    /// Print the form state as JSON
    #[arg(long = "json")]
    pub json: bool,
}

impl RunArgs {
    /// `--set` arguments split into name and value
    ///
    /// # Errors
    ///
    /// Returns `KeyformsError::InvalidInput` for an argument without `=` or
    /// with an empty name.
    pub fn values(&self) -> Result<Vec<(String, String)>, KeyformsError> {
        self.set
            .iter()
            .map(|setting| match setting.split_once('=') {
                Some((name, value)) if !name.trim().is_empty() => {
                    Ok((name.trim().to_string(), value.to_string()))
                }
                _ => Err(KeyformsError::InvalidInput(format!(
                    "Expected NAME=VALUE, got '{setting}'"
                ))),
            })
            .collect()
    }
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the configuration file path
    Path,

    /// Print the effective configuration
    Show,
}

/// Main CLI structure
#[derive(Parser, Debug)]
#[command(name = "keyforms")]
#[command(about = "Interactive forms for identification keys and character-set strings", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file to use instead of the default
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output (overrides config)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Open the interactive menu session (default)
    #[command(visible_alias = "i")]
    Interactive,

    /// Print menus, sub-menus and forms
    #[command(visible_alias = "m")]
    Menu,

    /// Fill in and submit a single form
    Run(RunArgs),

    /// Generate a shell completion script
    Completions {
        /// Target shell
        shell: Shell,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to Interactive if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Interactive)
    }
}
