#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    unreachable_pub,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Shared HTTP DTOs for the `RepoFlow` public API.
//!
//! These types describe the request payloads and response documents used by the
//! CLI, together with the table-presentation contract each response implements.
//! Layout: `workspace.rs` and `repository.rs` (resource DTOs), `table.rs`
//! (`Record`/`Renderable` contract).

use serde::{Deserialize, Serialize};

pub mod repository;
pub mod table;
pub mod workspace;

pub use repository::{
    LocalRepositoryRequest, RemoteRepositoryRequest, RepositoryCreateRequest, RepositoryDeletion,
    RepositoryDetail, RepositoryPackages, RepositoryRef, RepositorySummary,
    VirtualRepositoryRequest,
};
pub use table::{ABSENT, Record, Renderable, Shape};
pub use workspace::{WorkspaceCreateRequest, WorkspaceDetail, WorkspaceSummary};

/// Single-error document: a machine code plus a human message.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Machine-readable error code.
    #[serde(default)]
    pub code: String,
    /// Human-readable description; empty when the server omitted it.
    #[serde(default)]
    pub message: String,
}

/// Multi-error document carrying an ordered list of messages.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorList {
    /// Validation or runtime messages in server order.
    #[serde(default)]
    pub errors: Vec<String>,
}
