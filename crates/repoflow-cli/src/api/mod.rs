//! Typed `RepoFlow` API operations layered on [`ApiClient`](crate::client::ApiClient).
//!
//! Every operation sends one request, classifies the response, and decodes
//! the body into its DTO.

pub(crate) mod repositories;
pub(crate) mod workspaces;

/// API version prefix shared by every resource path.
pub(crate) const API_VERSION: &str = "1";
pub(crate) const WORKSPACES: &str = "workspaces";
pub(crate) const REPOSITORIES: &str = "repositories";
