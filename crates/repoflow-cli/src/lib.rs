#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    unreachable_pub,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::redundant_pub_crate)]

//! Command-line client for the `RepoFlow` package repository manager.
//!
//! Layout:
//! - `cli.rs`: argument parsing and command dispatch
//! - `commands/`: command handlers grouped by resource
//! - `api/`: typed API operations (one request per call)
//! - `client.rs`: HTTP transport, response classification, CLI errors
//! - `error.rs`: API and rendering error taxonomy
//! - `output.rs`: YAML, JSON, and table renderers
//! - `main.rs`: thin entrypoint delegating to `run()`

pub(crate) mod api;
pub(crate) mod cli;
pub(crate) mod client;
pub(crate) mod commands;
pub(crate) mod error;
pub(crate) mod output;

pub use cli::run;
