//! Failure taxonomy for API calls and output rendering.
//!
//! Transport failures (nothing usable came back) are kept apart from API
//! failures (the server answered with an error status) so callers can tell a
//! flaky network from a rejected request.

use reqwest::{Method, StatusCode};
use thiserror::Error;

/// Errors raised while talking to the `RepoFlow` API.
#[derive(Debug, Error)]
pub(crate) enum ApiError {
    /// Connection, TLS, or timeout failure before a complete response was read.
    #[error("request to {method} {url} failed")]
    Transport {
        method: Method,
        url: String,
        source: reqwest::Error,
    },
    /// Error document carrying a machine code and a message.
    #[error("API Error ({status}): {code} - {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
    /// Error document carrying a list of messages.
    #[error("API Errors ({status}): {}", .messages.join("; "))]
    Errors { status: u16, messages: Vec<String> },
    /// Error status without a recognisable body.
    #[error("request failed with status: {status}")]
    Status { status: StatusCode },
    /// Successful response whose body does not match the expected schema.
    #[error("failed to decode {what} response")]
    Decode {
        what: &'static str,
        source: serde_json::Error,
    },
    /// The configured base URL cannot be extended with path segments.
    #[error("base URL '{url}' cannot carry a request path")]
    InvalidUrl { url: String },
}

/// Local failures while presenting a result.
#[derive(Debug, Error)]
pub(crate) enum RenderError {
    /// Table output was requested for a value that has no tabular form.
    #[error("table output requires a record or a list of records, got {kind}")]
    Format { kind: &'static str },
    /// The value could not be serialised in the requested format.
    #[error("failed to serialise output as {format}: {detail}")]
    Serialization { format: &'static str, detail: String },
    /// Writing the rendered output failed.
    #[error("failed to write output")]
    Io(#[from] std::io::Error),
}
