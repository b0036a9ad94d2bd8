//! Logging initialisation and configuration.
//!
//! # Design
//! - Centralises subscriber setup (fmt or JSON) behind a single entry point.
//! - `RUST_LOG` refines the level unless the caller forces one (the CLI's
//!   `--debug` flag does).

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Level used when neither `RUST_LOG` nor `--debug` is provided.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Level selected by the `--debug` flag.
pub const DEBUG_LOG_LEVEL: &str = "debug";

/// Configure and install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the tracing subscriber cannot be installed (for example,
/// because another subscriber has already been set globally).
pub fn init_logging(config: &LoggingConfig<'_>) -> Result<()> {
    let filter = build_env_filter(config.level, config.force_level);
    let installed = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_thread_ids(false),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_thread_ids(false),
            )
            .try_init(),
    };
    installed.map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))?;
    tracing::debug!(
        level = config.level,
        forced = config.force_level,
        format = ?config.format,
        "logging initialised"
    );
    Ok(())
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig<'a> {
    /// Log level directive (e.g., `info`, `debug`).
    pub level: &'a str,
    /// When `true`, `level` is applied even if `RUST_LOG` is set.
    pub force_level: bool,
    /// Output format selection for the tracing subscriber.
    pub format: LogFormat,
}

impl Default for LoggingConfig<'_> {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL,
            force_level: false,
            format: LogFormat::Pretty,
        }
    }
}

impl LoggingConfig<'_> {
    /// Configuration for a CLI invocation: `debug` forces debug-level output.
    #[must_use]
    pub fn for_cli(debug: bool, format: LogFormat) -> Self {
        Self {
            level: if debug {
                DEBUG_LOG_LEVEL
            } else {
                DEFAULT_LOG_LEVEL
            },
            force_level: debug,
            format,
        }
    }
}

/// Available output formats for the logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Emit logs as structured JSON objects.
    Json,
    /// Emit human-readable lines.
    Pretty,
}

impl LogFormat {
    /// Parse a format name (`json` or `pretty`), falling back to `Pretty`.
    #[must_use]
    pub fn from_name(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            Some(value) if value.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Pretty,
        }
    }
}

fn build_env_filter(level: &str, force_level: bool) -> EnvFilter {
    if force_level {
        return EnvFilter::new(level);
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}
