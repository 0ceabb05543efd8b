//! Logging setup using `tracing` and `tracing-subscriber`
//!
//! # Log Levels
//!
//! - `error`: unexpected processing failures
//! - `warn`: forms that fail to mount, unreadable configuration
//! - `info`: results, context resets
//! - `debug`: range errors, declined confirmations, form selection
//! - `trace`: input registration and validation

use std::io;

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for logging behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    pub level: Level,
    pub with_ansi: bool,
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            with_ansi: true,
            with_target: false,
        }
    }
}

impl LogConfig {
    /// Level from the number of `-v` flags
    ///
    /// - 0: warn
    /// - 1: info
    /// - 2: debug
    /// - 3+: trace
    #[must_use]
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };

        Self {
            level,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }

    #[must_use]
    pub const fn with_target(mut self, enable: bool) -> Self {
        self.with_target = enable;
        self
    }
}

/// Filter for `level`, overridden by `RUST_LOG` when set
fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("keyforms={level}")))
}

/// Install the global stderr subscriber
///
/// A second call leaves the first subscriber in place.
pub fn init(config: LogConfig) {
    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(config.with_ansi)
        .with_target(config.with_target)
        .without_time();

    // Fails only if a subscriber is already installed
    let _ = tracing_subscriber::registry()
        .with(build_env_filter(config.level))
        .with(layer)
        .try_init();
}
