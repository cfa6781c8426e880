//! Whole-state JSON file backend.
//!
//! One document on disk holds the workspaces plus the three dependent
//! resource collections, so a single [`JsonFileStore`] can back both the
//! store contract and the resource managers for the CLI. Every operation is
//! load-mutate-save; mutations within one process are serialized behind a
//! lock, but there is no cross-process or cross-call transaction.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use super::WorkspaceStore;
use crate::model::{Workspace, WorkspaceId};
use crate::resources::{
    Connection, ConnectionsManager, Destination, DestinationsManager, Source, SourcesManager,
};

#[derive(Debug, Default, Serialize, Deserialize)]
struct FileState {
    #[serde(default)]
    workspaces: Vec<Workspace>,
    #[serde(default)]
    connections: Vec<Connection>,
    #[serde(default)]
    destinations: Vec<Destination>,
    #[serde(default)]
    sources: Vec<Source>,
}

pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<FileState> {
        if !self.path.exists() {
            return Ok(FileState::default());
        }
        let contents = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read state file {:?}", self.path))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse state file {:?}", self.path))
    }

    async fn save(&self, state: &FileState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("failed to create state directory {parent:?}"))?;
            }
        }
        let contents = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, contents)
            .await
            .with_context(|| format!("failed to write state file {:?}", self.path))?;
        debug!(path = ?self.path, workspaces = state.workspaces.len(), "state file saved");
        Ok(())
    }

    /// Seed a connection record (CLI and test setup).
    pub async fn add_connection(&self, connection: Connection) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut state = self.load().await?;
        state.connections.push(connection);
        self.save(&state).await
    }

    /// Seed a destination record (CLI and test setup).
    pub async fn add_destination(&self, destination: Destination) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut state = self.load().await?;
        state.destinations.push(destination);
        self.save(&state).await
    }

    /// Seed a source record (CLI and test setup).
    pub async fn add_source(&self, source: Source) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut state = self.load().await?;
        state.sources.push(source);
        self.save(&state).await
    }
}

fn visible(workspace: &Workspace, include_tombstoned: bool) -> bool {
    include_tombstoned || !workspace.tombstone
}

#[async_trait]
impl WorkspaceStore for JsonFileStore {
    async fn get(
        &self,
        workspace_id: &WorkspaceId,
        include_tombstoned: bool,
    ) -> Result<Option<Workspace>> {
        let state = self.load().await?;
        Ok(state
            .workspaces
            .into_iter()
            .find(|ws| ws.workspace_id == *workspace_id && visible(ws, include_tombstoned)))
    }

    async fn get_by_slug(
        &self,
        slug: &str,
        include_tombstoned: bool,
    ) -> Result<Option<Workspace>> {
        let state = self.load().await?;
        Ok(state
            .workspaces
            .into_iter()
            .find(|ws| ws.slug == slug && visible(ws, include_tombstoned)))
    }

    async fn list(&self, include_tombstoned: bool) -> Result<Vec<Workspace>> {
        let state = self.load().await?;
        Ok(state
            .workspaces
            .into_iter()
            .filter(|ws| visible(ws, include_tombstoned))
            .collect())
    }

    async fn write(&self, workspace: Workspace) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut state = self.load().await?;
        match state
            .workspaces
            .iter_mut()
            .find(|ws| ws.workspace_id == workspace.workspace_id)
        {
            Some(stored) => *stored = workspace,
            None => state.workspaces.push(workspace),
        }
        self.save(&state).await
    }
}

#[async_trait]
impl ConnectionsManager for JsonFileStore {
    async fn list_for_workspace(&self, workspace_id: &WorkspaceId) -> Result<Vec<Connection>> {
        let state = self.load().await?;
        Ok(state
            .connections
            .into_iter()
            .filter(|c| c.workspace_id == *workspace_id)
            .collect())
    }

    async fn deactivate(&self, connection: &Connection) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut state = self.load().await?;
        if let Some(stored) = state
            .connections
            .iter_mut()
            .find(|c| c.connection_id == connection.connection_id)
        {
            stored.enabled = false;
        }
        self.save(&state).await
    }
}

#[async_trait]
impl DestinationsManager for JsonFileStore {
    async fn list_for_workspace(&self, workspace_id: &WorkspaceId) -> Result<Vec<Destination>> {
        let state = self.load().await?;
        Ok(state
            .destinations
            .into_iter()
            .filter(|d| d.workspace_id == *workspace_id)
            .collect())
    }

    async fn deactivate(&self, destination: &Destination) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut state = self.load().await?;
        if let Some(stored) = state
            .destinations
            .iter_mut()
            .find(|d| d.destination_id == destination.destination_id)
        {
            stored.enabled = false;
        }
        self.save(&state).await
    }
}

#[async_trait]
impl SourcesManager for JsonFileStore {
    async fn list_for_workspace(&self, workspace_id: &WorkspaceId) -> Result<Vec<Source>> {
        let state = self.load().await?;
        Ok(state
            .sources
            .into_iter()
            .filter(|s| s.workspace_id == *workspace_id)
            .collect())
    }

    async fn deactivate(&self, source: &Source) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut state = self.load().await?;
        if let Some(stored) = state
            .sources
            .iter_mut()
            .find(|s| s.source_id == source.source_id)
        {
            stored.enabled = false;
        }
        self.save(&state).await
    }
}
