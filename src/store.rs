//! Workspace persistence contract.
//!
//! The store owns storage and whatever consistency it can offer; the
//! lifecycle service composes no multi-step transaction on top of it.
//! `include_tombstoned` widens visibility to soft-deleted records; normal
//! reads pass `false`.

use anyhow::Result;
use async_trait::async_trait;

use crate::model::{Workspace, WorkspaceId};

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryWorkspaceStore;

#[async_trait]
pub trait WorkspaceStore: Send + Sync {
    /// Fetch by id. `Ok(None)` means no visible record with that id.
    async fn get(
        &self,
        workspace_id: &WorkspaceId,
        include_tombstoned: bool,
    ) -> Result<Option<Workspace>>;

    /// Fetch by slug. `Ok(None)` means no visible record with that slug.
    async fn get_by_slug(
        &self,
        slug: &str,
        include_tombstoned: bool,
    ) -> Result<Option<Workspace>>;

    /// All visible records, in storage order.
    async fn list(&self, include_tombstoned: bool) -> Result<Vec<Workspace>>;

    /// Upsert by workspace id.
    async fn write(&self, workspace: Workspace) -> Result<()>;
}
