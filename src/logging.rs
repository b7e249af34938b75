//! Structured logging setup
//!
//! Diagnostics go through `tracing` and are written to stderr so reports on
//! stdout stay machine-readable. The level comes from, in order:
//! `--log-level`, `--verbose` (debug), `--quiet` (error),
//! `DEPLOY_DESCRIPTOR_LOG_LEVEL`, then `info`. `RUST_LOG`, when set, takes
//! over filtering entirely.
//!
//! ```no_run
//! use deploy_descriptor::logging::{LoggingConfig, init_logging};
//! use tracing::Level;
//!
//! init_logging(LoggingConfig::with_level(Level::DEBUG));
//! tracing::debug!(module = "api", "classifying module");
//! ```

use std::env;
use std::sync::Once;

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::constants::logging::{DEFAULT_LEVEL, LEVEL_ENV};

static INIT: Once = Once::new();

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: Level,
    /// Include the module target (e.g. `deploy_descriptor::detector`)
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            include_target: true,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Level from the CLI flags, falling back to the environment.
    pub fn from_flags(log_level: Option<&str>, verbose: bool, quiet: bool) -> Self {
        let env_level = env::var(LEVEL_ENV).ok();
        Self::with_level(resolve_level(log_level, verbose, quiet, env_level.as_deref()))
    }
}

/// Case-insensitive level name; `None` for anything unknown.
pub fn parse_level(level: &str) -> Option<Level> {
    match level.trim().to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

fn resolve_level(
    log_level: Option<&str>,
    verbose: bool,
    quiet: bool,
    env_level: Option<&str>,
) -> Level {
    if let Some(level) = log_level {
        if let Some(parsed) = parse_level(level) {
            return parsed;
        }
        eprintln!(
            "Invalid log level '{level}', defaulting to {DEFAULT_LEVEL}. Valid levels: trace, \
             debug, info, warn, error"
        );
    }
    if verbose {
        return Level::DEBUG;
    }
    if quiet {
        return Level::ERROR;
    }
    env_level
        .and_then(parse_level)
        .or_else(|| parse_level(DEFAULT_LEVEL))
        .unwrap_or(Level::INFO)
}

/// Install the global subscriber; later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut filter = EnvFilter::from_default_env();
        if env::var("RUST_LOG").is_err() {
            if let Ok(directive) = format!("deploy_descriptor={}", config.level).parse() {
                filter = filter.add_directive(directive);
            }
        }

        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(config.include_target)
                    .with_writer(std::io::stderr),
            )
            .init();
    });
}
