//! Dependent-resource contracts: the sibling managers the lifecycle service
//! drives during a cascading delete.
//!
//! Each resource kind (connection, destination, source) has its own manager
//! trait with the same two-call surface: list everything scoped to a
//! workspace, and deactivate one resource. Deactivation is idempotent from
//! the service's point of view; whether it flips a flag or tears down
//! infrastructure is the manager's business.

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::WorkspaceId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Connection {
    pub connection_id: Uuid,
    pub workspace_id: WorkspaceId,
    pub name: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Destination {
    pub destination_id: Uuid,
    pub workspace_id: WorkspaceId,
    pub name: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Source {
    pub source_id: Uuid,
    pub workspace_id: WorkspaceId,
    pub name: String,
    pub enabled: bool,
}

#[async_trait]
pub trait ConnectionsManager: Send + Sync {
    async fn list_for_workspace(&self, workspace_id: &WorkspaceId) -> Result<Vec<Connection>>;
    async fn deactivate(&self, connection: &Connection) -> Result<()>;
}

#[async_trait]
pub trait DestinationsManager: Send + Sync {
    async fn list_for_workspace(&self, workspace_id: &WorkspaceId) -> Result<Vec<Destination>>;
    async fn deactivate(&self, destination: &Destination) -> Result<()>;
}

#[async_trait]
pub trait SourcesManager: Send + Sync {
    async fn list_for_workspace(&self, workspace_id: &WorkspaceId) -> Result<Vec<Source>>;
    async fn deactivate(&self, source: &Source) -> Result<()>;
}

/// In-memory connections manager backed by a plain vector.
#[derive(Default)]
pub struct MemoryConnections {
    items: RwLock<Vec<Connection>>,
}

impl MemoryConnections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, connection: Connection) {
        self.items.write().push(connection);
    }

    pub fn enabled_count(&self) -> usize {
        self.items.read().iter().filter(|c| c.enabled).count()
    }
}

#[async_trait]
impl ConnectionsManager for MemoryConnections {
    async fn list_for_workspace(&self, workspace_id: &WorkspaceId) -> Result<Vec<Connection>> {
        Ok(self
            .items
            .read()
            .iter()
            .filter(|c| c.workspace_id == *workspace_id)
            .cloned()
            .collect())
    }

    async fn deactivate(&self, connection: &Connection) -> Result<()> {
        let mut items = self.items.write();
        if let Some(stored) = items
            .iter_mut()
            .find(|c| c.connection_id == connection.connection_id)
        {
            stored.enabled = false;
        }
        Ok(())
    }
}

/// In-memory destinations manager backed by a plain vector.
#[derive(Default)]
pub struct MemoryDestinations {
    items: RwLock<Vec<Destination>>,
}

impl MemoryDestinations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, destination: Destination) {
        self.items.write().push(destination);
    }

    pub fn enabled_count(&self) -> usize {
        self.items.read().iter().filter(|d| d.enabled).count()
    }
}

#[async_trait]
impl DestinationsManager for MemoryDestinations {
    async fn list_for_workspace(&self, workspace_id: &WorkspaceId) -> Result<Vec<Destination>> {
        Ok(self
            .items
            .read()
            .iter()
            .filter(|d| d.workspace_id == *workspace_id)
            .cloned()
            .collect())
    }

    async fn deactivate(&self, destination: &Destination) -> Result<()> {
        let mut items = self.items.write();
        if let Some(stored) = items
            .iter_mut()
            .find(|d| d.destination_id == destination.destination_id)
        {
            stored.enabled = false;
        }
        Ok(())
    }
}

/// In-memory sources manager backed by a plain vector.
#[derive(Default)]
pub struct MemorySources {
    items: RwLock<Vec<Source>>,
}

impl MemorySources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, source: Source) {
        self.items.write().push(source);
    }

    pub fn enabled_count(&self) -> usize {
        self.items.read().iter().filter(|s| s.enabled).count()
    }
}

#[async_trait]
impl SourcesManager for MemorySources {
    async fn list_for_workspace(&self, workspace_id: &WorkspaceId) -> Result<Vec<Source>> {
        Ok(self
            .items
            .read()
            .iter()
            .filter(|s| s.workspace_id == *workspace_id)
            .cloned()
            .collect())
    }

    async fn deactivate(&self, source: &Source) -> Result<()> {
        let mut items = self.items.write();
        if let Some(stored) = items.iter_mut().find(|s| s.source_id == source.source_id) {
            stored.enabled = false;
        }
        Ok(())
    }
}
