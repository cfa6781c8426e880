use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::notification::Notification;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct WorkspaceId(pub Uuid);

impl WorkspaceId {
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct CustomerId(pub Uuid);

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted workspace record.
///
/// `tombstone == true` marks a soft-deleted workspace: the record stays in
/// storage but is excluded from normal get/list visibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Workspace {
    pub workspace_id: WorkspaceId,
    pub customer_id: CustomerId,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub initial_setup_complete: bool,
    pub display_setup_wizard: bool,
    pub anonymous_data_collection: bool,
    pub news: bool,
    pub security_updates: bool,
    pub tombstone: bool,
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

/// Parameters for creating a workspace.
///
/// Unset boolean flags default to false. Ids and slug are derived by the
/// service, never supplied by the caller.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct WorkspaceCreate {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub anonymous_data_collection: Option<bool>,
    #[serde(default)]
    pub news: Option<bool>,
    #[serde(default)]
    pub security_updates: Option<bool>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

/// Parameters for updating a workspace.
///
/// These are full-overwrite semantics: every listed field except `email`
/// replaces the stored value, so callers must echo back the current values
/// for anything they do not intend to change. `email` is only replaced when
/// the new value is non-empty.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WorkspaceUpdate {
    pub workspace_id: WorkspaceId,
    #[serde(default)]
    pub email: Option<String>,
    pub initial_setup_complete: bool,
    pub display_setup_wizard: bool,
    pub anonymous_data_collection: bool,
    pub news: bool,
    pub security_updates: bool,
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

/// Externally visible workspace representation.
///
/// The tombstone flag is internal bookkeeping and is not exposed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WorkspaceRead {
    pub workspace_id: WorkspaceId,
    pub customer_id: CustomerId,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub initial_setup_complete: bool,
    pub display_setup_wizard: bool,
    pub anonymous_data_collection: bool,
    pub news: bool,
    pub security_updates: bool,
    pub notifications: Vec<Notification>,
}

impl From<&Workspace> for WorkspaceRead {
    fn from(workspace: &Workspace) -> Self {
        Self {
            workspace_id: workspace.workspace_id,
            customer_id: workspace.customer_id,
            name: workspace.name.clone(),
            slug: workspace.slug.clone(),
            email: workspace.email.clone(),
            initial_setup_complete: workspace.initial_setup_complete,
            display_setup_wizard: workspace.display_setup_wizard,
            anonymous_data_collection: workspace.anonymous_data_collection,
            news: workspace.news,
            security_updates: workspace.security_updates,
            notifications: workspace.notifications.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationTryStatus {
    Succeeded,
    Failed,
}

/// Outcome of a notification probe.
///
/// `message` carries the underlying delivery error text when present; a
/// failed probe with no message means the channel reported non-delivery
/// without raising an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NotificationTryResponse {
    pub status: NotificationTryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl NotificationTryResponse {
    pub fn succeeded() -> Self {
        Self {
            status: NotificationTryStatus::Succeeded,
            message: None,
        }
    }

    pub fn failed(message: Option<String>) -> Self {
        Self {
            status: NotificationTryStatus::Failed,
            message,
        }
    }
}
