use repoflow_api_models::{WorkspaceCreateRequest, WorkspaceDetail, WorkspaceSummary};
use serde_json::Value;

use super::{API_VERSION, WORKSPACES};
use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// `GET /1/workspaces`
    pub(crate) async fn list_workspaces(&self) -> Result<Vec<WorkspaceSummary>, ApiError> {
        self.get(&[API_VERSION, WORKSPACES], "workspace list").await
    }

    /// `POST /1/workspaces`
    pub(crate) async fn create_workspace(
        &self,
        request: &WorkspaceCreateRequest,
    ) -> Result<WorkspaceDetail, ApiError> {
        self.post(&[API_VERSION, WORKSPACES], request, "workspace")
            .await
    }

    /// `GET /1/workspaces/{id}`; `id` may be the identifier or the name.
    pub(crate) async fn get_workspace(&self, id: &str) -> Result<WorkspaceDetail, ApiError> {
        self.get(&[API_VERSION, WORKSPACES, id], "workspace").await
    }

    /// `DELETE /1/workspaces/{id}`
    ///
    /// The response has no fixed schema and is returned as raw JSON.
    pub(crate) async fn delete_workspace(&self, id: &str) -> Result<Value, ApiError> {
        self.delete(&[API_VERSION, WORKSPACES, id], "workspace deletion")
            .await
    }
}
