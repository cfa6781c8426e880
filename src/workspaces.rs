//! Workspace lifecycle service: the CRUD orchestrator over the store and
//! the sibling resource managers.
//!
//! Two sequences here are deliberately not transactional, matching the
//! store contract which owns all consistency: the slug conflict check
//! followed by the create write, and the delete cascade followed by the
//! tombstone write. Two callers racing on the same name or id can observe
//! the gap; closing it belongs to a store-level transaction or an
//! optimistic-concurrency token, not to this component.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use uuid::Uuid;

use crate::analytics::AnalyticsSink;
use crate::error::WorkspaceError;
use crate::model::{
    CustomerId, NotificationTryResponse, Workspace, WorkspaceCreate, WorkspaceId, WorkspaceRead,
    WorkspaceUpdate,
};
use crate::notification::{Notification, NotificationChannel, test_message};
use crate::resources::{ConnectionsManager, DestinationsManager, SourcesManager};
use crate::slug::slugify;
use crate::store::WorkspaceStore;

const DEFAULT_NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Strategy supplying fresh unique ids; injectable for deterministic tests.
pub type IdSupplier = Arc<dyn Fn() -> Uuid + Send + Sync>;

pub struct WorkspaceService {
    store: Arc<dyn WorkspaceStore>,
    connections: Arc<dyn ConnectionsManager>,
    destinations: Arc<dyn DestinationsManager>,
    sources: Arc<dyn SourcesManager>,
    analytics: Arc<dyn AnalyticsSink>,
    id_supplier: IdSupplier,
    notification_timeout: Duration,
}

impl WorkspaceService {
    pub fn new(
        store: Arc<dyn WorkspaceStore>,
        connections: Arc<dyn ConnectionsManager>,
        destinations: Arc<dyn DestinationsManager>,
        sources: Arc<dyn SourcesManager>,
        analytics: Arc<dyn AnalyticsSink>,
    ) -> Self {
        Self {
            store,
            connections,
            destinations,
            sources,
            analytics,
            id_supplier: Arc::new(Uuid::new_v4),
            notification_timeout: DEFAULT_NOTIFICATION_TIMEOUT,
        }
    }

    /// Replace the id supplier (tests use a fixed sequence).
    pub fn with_id_supplier(mut self, id_supplier: IdSupplier) -> Self {
        self.id_supplier = id_supplier;
        self
    }

    pub fn with_notification_timeout(mut self, timeout: Duration) -> Self {
        self.notification_timeout = timeout;
        self
    }

    /// Create a workspace from a request, enforcing slug uniqueness among
    /// non-tombstoned workspaces.
    pub async fn create(
        &self,
        request: WorkspaceCreate,
    ) -> Result<WorkspaceRead, WorkspaceError> {
        let slug = slugify(&request.name);

        // A not-found lookup is the expected success path here.
        if self.store.get_by_slug(&slug, false).await?.is_some() {
            return Err(WorkspaceError::SlugConflict(slug));
        }

        let workspace = Workspace {
            workspace_id: WorkspaceId((self.id_supplier)()),
            customer_id: CustomerId((self.id_supplier)()),
            name: request.name,
            slug,
            email: request.email.filter(|email| !email.is_empty()),
            initial_setup_complete: false,
            display_setup_wizard: false,
            anonymous_data_collection: request.anonymous_data_collection.unwrap_or(false),
            news: request.news.unwrap_or(false),
            security_updates: request.security_updates.unwrap_or(false),
            tombstone: false,
            notifications: request.notifications,
        };

        self.store.write(workspace.clone()).await?;
        info!(
            workspace_id = %workspace.workspace_id,
            slug = %workspace.slug,
            "workspace created"
        );
        Ok(WorkspaceRead::from(&workspace))
    }

    /// All non-tombstoned workspaces, in store order.
    pub async fn list(&self) -> Result<Vec<WorkspaceRead>, WorkspaceError> {
        let workspaces = self.store.list(false).await?;
        Ok(workspaces.iter().map(WorkspaceRead::from).collect())
    }

    pub async fn get(
        &self,
        workspace_id: &WorkspaceId,
    ) -> Result<WorkspaceRead, WorkspaceError> {
        let workspace = self
            .store
            .get(workspace_id, false)
            .await?
            .ok_or(WorkspaceError::WorkspaceNotFound(*workspace_id))?;
        Ok(WorkspaceRead::from(&workspace))
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<WorkspaceRead, WorkspaceError> {
        let workspace = self
            .store
            .get_by_slug(slug, false)
            .await?
            .ok_or_else(|| WorkspaceError::SlugNotFound(slug.to_string()))?;
        Ok(WorkspaceRead::from(&workspace))
    }

    /// Overwrite the mutable workspace fields and re-identify for analytics.
    ///
    /// Email is the one asymmetric field: an empty or unset value leaves the
    /// stored email untouched. The response is re-read from the store so it
    /// reflects exactly what was persisted.
    pub async fn update(
        &self,
        request: WorkspaceUpdate,
    ) -> Result<WorkspaceRead, WorkspaceError> {
        let mut workspace = self
            .store
            .get(&request.workspace_id, false)
            .await?
            .ok_or(WorkspaceError::WorkspaceNotFound(request.workspace_id))?;

        if let Some(email) = request.email.filter(|email| !email.is_empty()) {
            workspace.email = Some(email);
        }
        workspace.initial_setup_complete = request.initial_setup_complete;
        workspace.display_setup_wizard = request.display_setup_wizard;
        workspace.anonymous_data_collection = request.anonymous_data_collection;
        workspace.news = request.news;
        workspace.security_updates = request.security_updates;
        workspace.notifications = request.notifications;

        self.store.write(workspace).await?;
        info!(workspace_id = %request.workspace_id, "workspace updated");

        // Tracking-relevant fields changed; best-effort re-identify.
        if let Err(error) = self.analytics.identify(&request.workspace_id).await {
            warn!(
                workspace_id = %request.workspace_id,
                error = %error,
                "analytics identify failed"
            );
        }

        self.get(&request.workspace_id).await
    }

    /// Soft-delete a workspace after deactivating everything scoped to it.
    ///
    /// Resource kinds are processed in a fixed order: connections, then
    /// destinations, then sources. The first deactivation error propagates
    /// immediately; later stages are never fetched and the tombstone is not
    /// written, so a failed delete can leave the workspace half-deactivated
    /// but still active.
    pub async fn delete(&self, workspace_id: &WorkspaceId) -> Result<(), WorkspaceError> {
        let mut workspace = self
            .store
            .get(workspace_id, false)
            .await?
            .ok_or(WorkspaceError::WorkspaceNotFound(*workspace_id))?;

        let connections = self.connections.list_for_workspace(workspace_id).await?;
        for connection in &connections {
            self.connections.deactivate(connection).await?;
        }

        let destinations = self.destinations.list_for_workspace(workspace_id).await?;
        for destination in &destinations {
            self.destinations.deactivate(destination).await?;
        }

        let sources = self.sources.list_for_workspace(workspace_id).await?;
        for source in &sources {
            self.sources.deactivate(source).await?;
        }

        workspace.tombstone = true;
        self.store.write(workspace).await?;
        info!(
            workspace_id = %workspace_id,
            connections = connections.len(),
            destinations = destinations.len(),
            sources = sources.len(),
            "workspace tombstoned"
        );
        Ok(())
    }

    /// Probe a notification configuration by sending a fixed test message.
    ///
    /// Configuration problems fail with an error naming the type; delivery
    /// problems never error, they come back as a `Failed` response carrying
    /// the underlying text when there is any. No persisted side effects.
    pub async fn try_notification(
        &self,
        notification: &Notification,
    ) -> Result<NotificationTryResponse, WorkspaceError> {
        let channel = NotificationChannel::build(notification, self.notification_timeout)?;
        let message = test_message(notification.notification_type);

        match channel.send(&message).await {
            Ok(true) => Ok(NotificationTryResponse::succeeded()),
            Ok(false) => Ok(NotificationTryResponse::failed(None)),
            Err(error) => {
                warn!(
                    notification_type = %notification.notification_type,
                    error = %error,
                    "notification test delivery failed"
                );
                Ok(NotificationTryResponse::failed(Some(error.to_string())))
            }
        }
    }
}
