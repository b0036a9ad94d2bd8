//! Error types for configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    #[error("configuration file {} does not exist", .path.display())]
    FileNotFound {
        /// Path supplied by the caller.
        path: PathBuf,
    },
    /// The layered sources could not be read or merged.
    #[error("failed to load configuration ({operation})")]
    Load {
        /// Operation identifier.
        operation: &'static str,
        /// Source error from the `config` crate.
        source: config::ConfigError,
    },
    /// The resolved API URL is not an absolute URL.
    #[error("invalid API url '{value}'")]
    InvalidUrl {
        /// Offending value.
        value: String,
        /// Parse failure detail.
        source: url::ParseError,
    },
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;

pub(crate) fn load_err(operation: &'static str) -> impl FnOnce(config::ConfigError) -> ConfigError {
    move |source| ConfigError::Load { operation, source }
}
