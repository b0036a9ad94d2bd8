#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    unreachable_pub,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

//! File and environment backed configuration for the `RepoFlow` CLI.
//!
//! Layout: `loader.rs` (layered `ConfigLoader` and the resolved
//! `ClientConfig`), `error.rs` (`ConfigError`).

pub mod error;
pub mod loader;

pub use error::{ConfigError, ConfigResult};
pub use loader::{
    CONFIG_FILE_STEM, ClientConfig, ConfigLoader, DEFAULT_API_URL, ENV_PREFIX, SEARCH_DIRS, load,
};
