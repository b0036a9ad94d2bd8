use repoflow_api_models::{
    RepositoryCreateRequest, RepositoryDeletion, RepositoryDetail, RepositoryPackages,
    RepositorySummary,
};

use super::{API_VERSION, REPOSITORIES, WORKSPACES};
use crate::client::ApiClient;
use crate::error::ApiError;

const PACKAGES: &str = "packages";
const CONTENT: &str = "content";

/// Segments of `/1/workspaces/{workspace}/repositories/{tail..}`.
fn repository_path<'a>(workspace: &'a str, tail: &[&'a str]) -> Vec<&'a str> {
    let mut segments = vec![API_VERSION, WORKSPACES, workspace, REPOSITORIES];
    segments.extend_from_slice(tail);
    segments
}

impl ApiClient {
    /// `GET /1/workspaces/{workspace}/repositories`
    pub(crate) async fn list_repositories(
        &self,
        workspace: &str,
    ) -> Result<Vec<RepositorySummary>, ApiError> {
        self.get(&repository_path(workspace, &[]), "repository list")
            .await
    }

    /// `GET /1/workspaces/{workspace}/repositories/{id}`
    pub(crate) async fn get_repository(
        &self,
        workspace: &str,
        id: &str,
    ) -> Result<RepositoryDetail, ApiError> {
        self.get(&repository_path(workspace, &[id]), "repository")
            .await
    }

    /// `GET /1/workspaces/{workspace}/repositories/{id}/packages`
    ///
    /// Returns the first page as served; no pagination parameters are sent.
    pub(crate) async fn list_repository_packages(
        &self,
        workspace: &str,
        id: &str,
    ) -> Result<RepositoryPackages, ApiError> {
        self.get(
            &repository_path(workspace, &[id, PACKAGES]),
            "package listing",
        )
        .await
    }

    /// `POST /1/workspaces/{workspace}/repositories/{local|remote|virtual}`
    ///
    /// `None` when the server answers without a body.
    pub(crate) async fn create_repository(
        &self,
        workspace: &str,
        request: &RepositoryCreateRequest,
    ) -> Result<Option<RepositorySummary>, ApiError> {
        self.post(
            &repository_path(workspace, &[request.store()]),
            request,
            "repository",
        )
        .await
    }

    /// `DELETE /1/workspaces/{workspace}/repositories/{id}`
    ///
    /// `None` for `204 No Content` or an empty body.
    pub(crate) async fn delete_repository(
        &self,
        workspace: &str,
        id: &str,
    ) -> Result<Option<RepositoryDeletion>, ApiError> {
        self.delete(&repository_path(workspace, &[id]), "repository deletion")
            .await
    }

    /// `DELETE /1/workspaces/{workspace}/repositories/{id}/content`
    ///
    /// Purges stored artifacts and keeps the repository definition.
    pub(crate) async fn delete_repository_content(
        &self,
        workspace: &str,
        id: &str,
    ) -> Result<Option<RepositoryDeletion>, ApiError> {
        self.delete(
            &repository_path(workspace, &[id, CONTENT]),
            "repository content deletion",
        )
        .await
    }
}
