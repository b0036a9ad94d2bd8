//! Layered configuration loader.
//!
//! # Design
//! - Precedence, lowest to highest: compiled defaults, one config file,
//!   `REPOFLOW_*` environment variables.
//! - Without an explicit path the first `config.<ext>` found under
//!   `./configs` and then `.` is used; a missing file is not an error.
//! - The environment source can be injected so tests never mutate the
//!   process environment.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, Map};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::{ConfigError, ConfigResult, load_err};

/// API endpoint used when neither file nor environment provide one.
pub const DEFAULT_API_URL: &str = "https://127.0.0.1/api";
/// Prefix for environment overrides (`REPOFLOW_URL`, `REPOFLOW_TOKEN`).
pub const ENV_PREFIX: &str = "REPOFLOW";
/// File stem searched for when no explicit path is given.
pub const CONFIG_FILE_STEM: &str = "config";
/// Directories searched, in order, relative to the search root.
pub const SEARCH_DIRS: [&str; 2] = ["configs", "."];

const EXTENSIONS: [&str; 7] = ["toml", "json", "yaml", "yml", "ini", "ron", "json5"];

/// Resolved client settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the API, including any path prefix.
    pub url: String,
    /// Bearer token attached to every request.
    #[serde(default)]
    pub token: Option<String>,
}

impl ClientConfig {
    /// Bearer token, treating an empty value as absent.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    /// Parse the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] when the value is not an absolute URL.
    pub fn base_url(&self) -> ConfigResult<Url> {
        self.url.parse::<Url>().map_err(|source| ConfigError::InvalidUrl {
            value: self.url.clone(),
            source,
        })
    }
}

/// Builder describing where configuration is read from.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
    search_root: PathBuf,
    env: Option<Map<String, String>>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            file: None,
            search_root: PathBuf::from("."),
            env: None,
        }
    }
}

impl ConfigLoader {
    /// Loader reading the process environment and searching the working directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit configuration file instead of searching.
    #[must_use]
    pub fn with_file(mut self, file: Option<PathBuf>) -> Self {
        self.file = file;
        self
    }

    /// Search for `config.<ext>` relative to `root` instead of the working directory.
    #[must_use]
    pub fn with_search_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.search_root = root.into();
        self
    }

    /// Replace the process environment with an explicit variable map.
    #[must_use]
    pub fn with_env_source(mut self, vars: Map<String, String>) -> Self {
        self.env = Some(vars);
        self
    }

    /// Locate the configuration file that a search would use.
    #[must_use]
    pub fn discover(&self) -> Option<PathBuf> {
        SEARCH_DIRS.iter().find_map(|dir| {
            let base = self.search_root.join(dir);
            EXTENSIONS
                .iter()
                .map(|ext| base.join(format!("{CONFIG_FILE_STEM}.{ext}")))
                .find(|candidate| candidate.is_file())
        })
    }

    /// Resolve the layered configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when an explicit file is missing, a file cannot be
    /// parsed, or the resolved URL is invalid.
    pub fn load(&self) -> ConfigResult<ClientConfig> {
        let mut builder = Config::builder()
            .set_default("url", DEFAULT_API_URL)
            .map_err(load_err("config.defaults"))?;

        if let Some(path) = self.file_source()? {
            debug!(path = %path.display(), "using configuration file");
            builder = builder.add_source(File::from(path.as_path()).required(true));
        }

        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).source(self.env.clone()));

        let config = builder
            .build()
            .map_err(load_err("config.build"))?
            .try_deserialize::<ClientConfig>()
            .map_err(load_err("config.deserialize"))?;

        config.base_url()?;
        Ok(config)
    }

    fn file_source(&self) -> ConfigResult<Option<PathBuf>> {
        match &self.file {
            Some(path) if path.is_file() => Ok(Some(path.clone())),
            Some(path) => Err(ConfigError::FileNotFound { path: path.clone() }),
            None => Ok(self.discover()),
        }
    }
}

/// Convenience wrapper: load from `path` (or search) with the process environment.
///
/// # Errors
///
/// See [`ConfigLoader::load`].
pub fn load(path: Option<&Path>) -> ConfigResult<ClientConfig> {
    ConfigLoader::new()
        .with_file(path.map(Path::to_path_buf))
        .load()
}
