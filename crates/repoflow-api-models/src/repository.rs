//! Repository DTOs: local, remote-proxy, and virtual package stores.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::table::{Record, Renderable, Shape, list_cell, optional_cell};

/// Entry returned by the repository listing and creation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySummary {
    /// Server-assigned identifier.
    pub id: String,
    /// Repository name, unique within its workspace.
    pub name: String,
    /// Package ecosystem stored (`npm`, `maven`, ...).
    pub package_type: String,
    /// Store kind (`local`, `remote`, `virtual`).
    pub repository_type: String,
    /// Lifecycle status reported by the server.
    pub status: String,
}

impl Record for RepositorySummary {
    fn fields(&self) -> Vec<(&str, String)> {
        vec![
            ("id", self.id.clone()),
            ("name", self.name.clone()),
            ("packageType", self.package_type.clone()),
            ("repositoryType", self.repository_type.clone()),
            ("status", self.status.clone()),
        ]
    }
}

impl Renderable for RepositorySummary {
    fn shape(&self) -> Shape<'_> {
        Shape::Record(self)
    }
}

/// Lightweight `{id, name}` reference to a repository or package.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepositoryRef {
    /// Referenced identifier.
    pub id: String,
    /// Referenced name.
    pub name: String,
}

impl Display for RepositoryRef {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{{} {}}}", self.id, self.name)
    }
}

impl Record for RepositoryRef {
    fn fields(&self) -> Vec<(&str, String)> {
        vec![("id", self.id.clone()), ("name", self.name.clone())]
    }
}

/// Full repository document returned by `GET .../repositories/{id}`.
///
/// Remote-only and virtual-only attributes are absent for other store kinds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryDetail {
    /// Repository name.
    pub name: String,
    /// Server-assigned identifier.
    pub id: String,
    /// Store kind (`local`, `remote`, `virtual`).
    pub repository_type: String,
    /// Package ecosystem stored.
    pub package_type: String,
    /// Lifecycle status reported by the server.
    pub status: String,
    /// Owning workspace identifier.
    #[serde(default)]
    pub workspace_id: String,
    /// Local repository receiving uploads for a virtual repository.
    #[serde(default)]
    pub upload_target_local_repository: Option<RepositoryRef>,
    /// Members of a virtual repository.
    #[serde(default)]
    pub child_repositories: Vec<RepositoryRef>,
    /// Upstream registry URL of a remote repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_repository_url: Option<String>,
    /// Whether a remote repository caches upstream artifacts.
    #[serde(default)]
    pub is_remote_cache_enabled: bool,
    /// Milliseconds before cached files are revalidated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_cache_time_till_revalidation: Option<i64>,
    /// Milliseconds before cached metadata is revalidated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_cache_time_till_revalidation: Option<i64>,
}

impl Record for RepositoryDetail {
    fn fields(&self) -> Vec<(&str, String)> {
        vec![
            ("name", self.name.clone()),
            ("id", self.id.clone()),
            ("repositoryType", self.repository_type.clone()),
            ("packageType", self.package_type.clone()),
            ("status", self.status.clone()),
            ("workspaceId", self.workspace_id.clone()),
            (
                "uploadTargetLocalRepository",
                optional_cell(self.upload_target_local_repository.as_ref()),
            ),
            ("childRepositories", list_cell(&self.child_repositories)),
            (
                "remoteRepositoryUrl",
                optional_cell(self.remote_repository_url.as_ref()),
            ),
            (
                "isRemoteCacheEnabled",
                self.is_remote_cache_enabled.to_string(),
            ),
            (
                "fileCacheTimeTillRevalidation",
                optional_cell(self.file_cache_time_till_revalidation.as_ref()),
            ),
            (
                "metadataCacheTimeTillRevalidation",
                optional_cell(self.metadata_cache_time_till_revalidation.as_ref()),
            ),
        ]
    }
}

impl Renderable for RepositoryDetail {
    fn shape(&self) -> Shape<'_> {
        Shape::Record(self)
    }
}

/// Page of packages stored in a repository.
///
/// Only the first page is fetched; tables show the `packages` rows while
/// YAML/JSON output keeps the paging envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepositoryPackages {
    /// Total packages in the repository.
    #[serde(default)]
    pub total: i64,
    /// Offset of the first returned package.
    #[serde(default)]
    pub offset: i64,
    /// Page size applied by the server.
    #[serde(default)]
    pub limit: i64,
    /// Packages on this page.
    #[serde(default)]
    pub packages: Vec<RepositoryRef>,
}

impl Renderable for RepositoryPackages {
    fn shape(&self) -> Shape<'_> {
        self.packages.shape()
    }
}

/// Result of deleting a repository or purging its content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryDeletion {
    /// Identifier of the affected repository.
    pub repository_id: String,
    /// Status reported for the deletion.
    pub status: String,
}

impl Record for RepositoryDeletion {
    fn fields(&self) -> Vec<(&str, String)> {
        vec![
            ("repositoryId", self.repository_id.clone()),
            ("status", self.status.clone()),
        ]
    }
}

impl Renderable for RepositoryDeletion {
    fn shape(&self) -> Shape<'_> {
        Shape::Record(self)
    }
}

/// Payload for creating a local repository (the origin for uploads).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LocalRepositoryRequest {
    /// Repository name.
    pub name: String,
    /// Package ecosystem stored.
    pub package_type: String,
}

/// Payload for creating a remote repository proxying an external registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRepositoryRequest {
    /// Repository name.
    pub name: String,
    /// Package ecosystem stored.
    pub package_type: String,
    /// Upstream registry URL.
    pub remote_repository_url: String,
    /// Whether upstream artifacts are cached.
    pub is_remote_cache_enabled: bool,
    /// Username presented to the upstream registry.
    pub remote_repository_username: String,
    /// Password presented to the upstream registry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_repository_password: Option<String>,
    /// Milliseconds before cached files are revalidated; omitted for
    /// indefinite caching.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_cache_time_till_revalidation: Option<i64>,
    /// Milliseconds before cached metadata is revalidated; omitted for
    /// indefinite caching.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_cache_time_till_revalidation: Option<i64>,
}

/// Payload for creating a virtual repository aggregating children.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualRepositoryRequest {
    /// Repository name.
    pub name: String,
    /// Package ecosystem stored.
    pub package_type: String,
    /// Identifiers of the aggregated repositories.
    pub child_repository_ids: Vec<String>,
    /// Local child that receives uploads; must be listed in
    /// `child_repository_ids`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_local_repository_id: Option<String>,
}

/// Creation payload for any store kind.
///
/// Serialises as the bare inner payload; the store kind selects the endpoint.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RepositoryCreateRequest {
    /// `POST .../repositories/local`
    Local(LocalRepositoryRequest),
    /// `POST .../repositories/remote`
    Remote(RemoteRepositoryRequest),
    /// `POST .../repositories/virtual`
    Virtual(VirtualRepositoryRequest),
}

impl RepositoryCreateRequest {
    /// Endpoint segment selecting the store kind.
    #[must_use]
    pub const fn store(&self) -> &'static str {
        match self {
            Self::Local(_) => "local",
            Self::Remote(_) => "remote",
            Self::Virtual(_) => "virtual",
        }
    }

    /// Name of the repository being created.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Local(request) => &request.name,
            Self::Remote(request) => &request.name,
            Self::Virtual(request) => &request.name,
        }
    }
}
