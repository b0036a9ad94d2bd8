#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    unreachable_pub,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

//! Logging primitives for the `RepoFlow` CLI.
//!
//! Diagnostics always go to stderr so rendered command output on stdout stays
//! machine-readable.

pub mod init;

pub use init::{DEBUG_LOG_LEVEL, DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging};
