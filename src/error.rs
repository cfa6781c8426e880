//! Caller-visible error taxonomy for workspace operations.
//!
//! Distinct kinds exist so callers can render "name already taken" or a
//! plain 404 instead of a generic failure. Store and transport errors pass
//! through unchanged as `Internal`.

use thiserror::Error;

use crate::model::WorkspaceId;
use crate::notification::NotificationType;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// No non-tombstoned workspace with the requested id.
    #[error("workspace {0} not found")]
    WorkspaceNotFound(WorkspaceId),

    /// No non-tombstoned workspace with the requested slug.
    #[error("no workspace with slug {0}")]
    SlugNotFound(String),

    /// Slug collision on create; the caller should pick a different name.
    #[error("a workspace with slug {0} already exists")]
    SlugConflict(String),

    /// A notification configuration the channel factory cannot turn into a
    /// working channel. Always names the offending type.
    #[error("cannot build {notification_type} notification channel: {reason}")]
    InvalidNotification {
        notification_type: NotificationType,
        reason: String,
    },

    /// Store or collaborator failure, surfaced unchanged.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl WorkspaceError {
    /// Error category used in structured logs.
    pub fn category(&self) -> &'static str {
        match self {
            WorkspaceError::WorkspaceNotFound(_) | WorkspaceError::SlugNotFound(_) => "not_found",
            WorkspaceError::SlugConflict(_) => "conflict",
            WorkspaceError::InvalidNotification { .. } => "invalid_notification",
            WorkspaceError::Internal(_) => "internal",
        }
    }
}
