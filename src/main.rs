//! Keyforms CLI application entry point
//!
//! # Usage
//!
//! ```bash
//! # Menu-driven session (default command)
//! keyforms
//! keyforms interactive
//!
//! # Print the menu tree with the slugs `run` accepts
//! keyforms menu
//!
//! # Fill in and submit one form
//! keyforms run gs1-id-key gtin create --set prefix=0614141 --set value=1
//! keyforms run string numeric create-sequence -s length=6 -s startValue=0 -s count=5000 --yes --json
//!
//! # Shell completions
//! keyforms completions zsh
//! ```
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/keyforms/config.toml` on Linux) and created on first run.
//! `--config PATH` reads another file instead.

use std::io;
use std::process::ExitCode;

use keyforms::{
    KeyformsError,
    cli::{Cli, Commands},
    commands,
    config::KeyformsConfig,
    demo::Menus,
    logging::{self, LogConfig},
    ui::{DialoguerInput, OutputWriter, StdoutWriter},
};

type Result<T> = std::result::Result<T, KeyformsError>;

fn load_config(cli: &Cli) -> Result<KeyformsConfig> {
    let config = match &cli.config {
        Some(path) => KeyformsConfig::load_from(path)?,
        None => KeyformsConfig::load()?,
    };

    Ok(config)
}

fn run(cli: &Cli) -> Result<bool> {
    let config = load_config(cli)?;

    if cli.no_color || !config.color {
        colored::control::set_override(false);
    }

    let menus = Menus::standard();
    let input = DialoguerInput::new();
    let output = StdoutWriter::new();

    match cli.get_command() {
        Commands::Interactive => commands::interactive(&menus, &config, &input, &output)?,
        Commands::Menu => commands::menu(&menus, &output, cli.quiet),
        Commands::Run(args) => {
            return commands::run(&menus, &config, &args, &input, &output, cli.quiet);
        }
        Commands::Completions { shell } => commands::completions(shell, &mut io::stdout()),
        Commands::Config { command } => {
            commands::config(&config, cli.config.clone(), &command, &output)?;
        }
    }

    Ok(true)
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    logging::init(LogConfig::from_verbosity(cli.verbose).with_ansi(!cli.no_color));

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            StdoutWriter::new().error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
