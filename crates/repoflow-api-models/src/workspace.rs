//! Workspace DTOs: tenant-level containers carrying usage quotas.

use serde::{Deserialize, Serialize};

use crate::table::{Record, Renderable, Shape, optional_cell};

/// Entry returned by the workspace listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkspaceSummary {
    /// Server-assigned identifier.
    pub id: String,
    /// Human-readable workspace name.
    pub name: String,
}

impl Record for WorkspaceSummary {
    fn fields(&self) -> Vec<(&str, String)> {
        vec![("id", self.id.clone()), ("name", self.name.clone())]
    }
}

impl Renderable for WorkspaceSummary {
    fn shape(&self) -> Shape<'_> {
        Shape::Record(self)
    }
}

/// Full workspace document including usage counters and quotas.
///
/// Quotas are `None` when the workspace is unlimited.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceDetail {
    /// Server-assigned identifier.
    pub id: String,
    /// Human-readable workspace name.
    pub name: String,
    /// Bytes currently stored.
    #[serde(default)]
    pub storage_usage_in_byte: i64,
    /// Storage quota in bytes.
    #[serde(default)]
    pub storage_limit_in_byte: Option<i64>,
    /// Bytes transferred in the current accounting window.
    #[serde(default)]
    pub transfer_usage_in_byte: i64,
    /// Transfer quota in bytes.
    #[serde(default)]
    pub transfer_limit_in_byte: Option<i64>,
    /// Number of packages stored.
    #[serde(default)]
    pub package_usage: i64,
    /// Maximum number of packages.
    #[serde(default)]
    pub package_limit: Option<i64>,
    /// AI feature invocations consumed.
    #[serde(default)]
    pub ai_usage_count: i64,
    /// AI feature invocation quota.
    #[serde(default)]
    pub ai_usage_limit: Option<i64>,
}

impl Record for WorkspaceDetail {
    fn fields(&self) -> Vec<(&str, String)> {
        vec![
            ("id", self.id.clone()),
            ("name", self.name.clone()),
            ("storageUsageInByte", self.storage_usage_in_byte.to_string()),
            (
                "storageLimitInByte",
                optional_cell(self.storage_limit_in_byte.as_ref()),
            ),
            (
                "transferUsageInByte",
                self.transfer_usage_in_byte.to_string(),
            ),
            (
                "transferLimitInByte",
                optional_cell(self.transfer_limit_in_byte.as_ref()),
            ),
            ("packageUsage", self.package_usage.to_string()),
            ("packageLimit", optional_cell(self.package_limit.as_ref())),
            ("aiUsageCount", self.ai_usage_count.to_string()),
            ("aiUsageLimit", optional_cell(self.ai_usage_limit.as_ref())),
        ]
    }
}

impl Renderable for WorkspaceDetail {
    fn shape(&self) -> Shape<'_> {
        Shape::Record(self)
    }
}

/// Payload for `POST /1/workspaces`.
///
/// Unset limits are omitted from the body so the server applies its defaults;
/// `Some(0)` is sent as an explicit zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceCreateRequest {
    /// Name of the new workspace.
    pub name: String,
    /// Maximum packages allowed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_limit: Option<i64>,
    /// Bandwidth limit in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth_limit: Option<i64>,
    /// Storage limit in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_limit: Option<i64>,
    /// Free-form notes about the workspace.
    #[serde(rename = "comment", skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}
