//! Analytics identity seam.
//!
//! The lifecycle service re-identifies a workspace after tracking-relevant
//! updates. The sink is constructor-injected rather than ambient global
//! state, and the caller treats it as best-effort: a failed identify is
//! logged and never fails the triggering operation.

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::model::WorkspaceId;

#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    async fn identify(&self, workspace_id: &WorkspaceId) -> Result<()>;
}

/// Default sink: records the identify event in the structured log stream.
pub struct TracingAnalytics;

#[async_trait]
impl AnalyticsSink for TracingAnalytics {
    async fn identify(&self, workspace_id: &WorkspaceId) -> Result<()> {
        info!(workspace_id = %workspace_id, "workspace re-identified for analytics");
        Ok(())
    }
}

/// Sink used when analytics is disabled by configuration.
pub struct NoopAnalytics;

#[async_trait]
impl AnalyticsSink for NoopAnalytics {
    async fn identify(&self, _workspace_id: &WorkspaceId) -> Result<()> {
        Ok(())
    }
}
