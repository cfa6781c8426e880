//! In-memory workspace store for tests and ephemeral use.

use anyhow::Result;
use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;

use super::WorkspaceStore;
use crate::model::{Workspace, WorkspaceId};

/// Insertion-ordered map behind an RwLock. Listing returns records in the
/// order they were first written, matching the store-order contract.
#[derive(Default)]
pub struct MemoryWorkspaceStore {
    records: RwLock<IndexMap<WorkspaceId, Workspace>>,
}

impl MemoryWorkspaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total record count including tombstoned entries.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

fn visible(workspace: &Workspace, include_tombstoned: bool) -> bool {
    include_tombstoned || !workspace.tombstone
}

#[async_trait]
impl WorkspaceStore for MemoryWorkspaceStore {
    async fn get(
        &self,
        workspace_id: &WorkspaceId,
        include_tombstoned: bool,
    ) -> Result<Option<Workspace>> {
        Ok(self
            .records
            .read()
            .get(workspace_id)
            .filter(|ws| visible(ws, include_tombstoned))
            .cloned())
    }

    async fn get_by_slug(
        &self,
        slug: &str,
        include_tombstoned: bool,
    ) -> Result<Option<Workspace>> {
        Ok(self
            .records
            .read()
            .values()
            .find(|ws| ws.slug == slug && visible(ws, include_tombstoned))
            .cloned())
    }

    async fn list(&self, include_tombstoned: bool) -> Result<Vec<Workspace>> {
        Ok(self
            .records
            .read()
            .values()
            .filter(|ws| visible(ws, include_tombstoned))
            .cloned()
            .collect())
    }

    async fn write(&self, workspace: Workspace) -> Result<()> {
        self.records
            .write()
            .insert(workspace.workspace_id, workspace);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CustomerId;
    use uuid::Uuid;

    fn record(name: &str, slug: &str, tombstone: bool) -> Workspace {
        Workspace {
            workspace_id: WorkspaceId(Uuid::new_v4()),
            customer_id: CustomerId(Uuid::new_v4()),
            name: name.to_string(),
            slug: slug.to_string(),
            email: None,
            initial_setup_complete: false,
            display_setup_wizard: false,
            anonymous_data_collection: false,
            news: false,
            security_updates: false,
            tombstone,
            notifications: vec![],
        }
    }

    #[tokio::test]
    async fn tombstoned_records_hidden_unless_requested() {
        let store = MemoryWorkspaceStore::new();
        let live = record("Live", "live", false);
        let dead = record("Dead", "dead", true);
        store.write(live.clone()).await.unwrap();
        store.write(dead.clone()).await.unwrap();

        assert!(store.get(&dead.workspace_id, false).await.unwrap().is_none());
        assert!(store.get(&dead.workspace_id, true).await.unwrap().is_some());
        assert!(store.get_by_slug("dead", false).await.unwrap().is_none());
        assert!(store.get_by_slug("dead", true).await.unwrap().is_some());

        assert_eq!(store.list(false).await.unwrap().len(), 1);
        assert_eq!(store.list(true).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn write_is_an_upsert_by_id() {
        let store = MemoryWorkspaceStore::new();
        let mut ws = record("Original", "original", false);
        store.write(ws.clone()).await.unwrap();

        ws.email = Some("team@example.test".to_string());
        store.write(ws.clone()).await.unwrap();

        assert_eq!(store.len(), 1);
        let fetched = store.get(&ws.workspace_id, false).await.unwrap().unwrap();
        assert_eq!(fetched.email.as_deref(), Some("team@example.test"));
    }

    #[tokio::test]
    async fn listing_preserves_insertion_order() {
        let store = MemoryWorkspaceStore::new();
        let first = record("First", "first", false);
        let second = record("Second", "second", false);
        store.write(first.clone()).await.unwrap();
        store.write(second.clone()).await.unwrap();

        let listed = store.list(false).await.unwrap();
        assert_eq!(listed[0].workspace_id, first.workspace_id);
        assert_eq!(listed[1].workspace_id, second.workspace_id);
    }
}
