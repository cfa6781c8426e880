use std::sync::Arc;

use assert_matches::assert_matches;
use tempfile::TempDir;
use uuid::Uuid;

use workspace_admin::analytics::NoopAnalytics;
use workspace_admin::resources::{
    Connection, ConnectionsManager, Destination, Source, SourcesManager,
};
use workspace_admin::store::WorkspaceStore;
use workspace_admin::{
    JsonFileStore, WorkspaceCreate, WorkspaceError, WorkspaceService,
};

fn store_in(dir: &TempDir) -> JsonFileStore {
    JsonFileStore::new(dir.path().join("state.json"))
}

fn file_service(store: Arc<JsonFileStore>) -> WorkspaceService {
    WorkspaceService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store,
        Arc::new(NoopAnalytics),
    )
}

fn create_request(name: &str) -> WorkspaceCreate {
    WorkspaceCreate {
        name: name.to_string(),
        ..WorkspaceCreate::default()
    }
}

#[tokio::test]
async fn state_survives_a_reload() {
    let dir = TempDir::new().unwrap();
    let created = {
        let store = Arc::new(store_in(&dir));
        file_service(store).create(create_request("Persistent")).await.unwrap()
    };

    // Fresh handle over the same file.
    let store = Arc::new(store_in(&dir));
    let reloaded = file_service(store)
        .get(&created.workspace_id)
        .await
        .unwrap();
    assert_eq!(reloaded, created);
}

#[tokio::test]
async fn missing_state_file_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    assert!(store.list(true).await.unwrap().is_empty());
    assert!(store
        .get_by_slug("anything", true)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn write_upserts_by_workspace_id() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let service = file_service(Arc::new(store));
    let created = service.create(create_request("Versioned")).await.unwrap();

    let updated = service
        .update(workspace_admin::WorkspaceUpdate {
            workspace_id: created.workspace_id,
            email: Some("v2@example.test".to_string()),
            initial_setup_complete: true,
            display_setup_wizard: false,
            anonymous_data_collection: false,
            news: false,
            security_updates: false,
            notifications: vec![],
        })
        .await
        .unwrap();
    assert_eq!(updated.email.as_deref(), Some("v2@example.test"));

    let listed = service.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], updated);
}

#[tokio::test]
async fn resource_collections_are_scoped_and_persistent() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(store_in(&dir));
    let service = file_service(store.clone());

    let ws_a = service.create(create_request("Tenant A")).await.unwrap();
    let ws_b = service.create(create_request("Tenant B")).await.unwrap();

    store
        .add_connection(Connection {
            connection_id: Uuid::new_v4(),
            workspace_id: ws_a.workspace_id,
            name: "pg-to-warehouse".to_string(),
            enabled: true,
        })
        .await
        .unwrap();
    store
        .add_source(Source {
            source_id: Uuid::new_v4(),
            workspace_id: ws_b.workspace_id,
            name: "events".to_string(),
            enabled: true,
        })
        .await
        .unwrap();

    let a_connections = ConnectionsManager::list_for_workspace(&*store, &ws_a.workspace_id)
        .await
        .unwrap();
    assert_eq!(a_connections.len(), 1);
    let b_connections = ConnectionsManager::list_for_workspace(&*store, &ws_b.workspace_id)
        .await
        .unwrap();
    assert!(b_connections.is_empty());

    // Deactivation is persisted through a reload.
    ConnectionsManager::deactivate(&*store, &a_connections[0])
        .await
        .unwrap();
    let fresh = store_in(&dir);
    let reloaded = ConnectionsManager::list_for_workspace(&fresh, &ws_a.workspace_id)
        .await
        .unwrap();
    assert!(!reloaded[0].enabled);
}

#[tokio::test]
async fn delete_cascade_runs_against_the_file_backend() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(store_in(&dir));
    let service = file_service(store.clone());

    let created = service.create(create_request("Full Stack")).await.unwrap();
    store
        .add_connection(Connection {
            connection_id: Uuid::new_v4(),
            workspace_id: created.workspace_id,
            name: "sync".to_string(),
            enabled: true,
        })
        .await
        .unwrap();
    store
        .add_destination(Destination {
            destination_id: Uuid::new_v4(),
            workspace_id: created.workspace_id,
            name: "warehouse".to_string(),
            enabled: true,
        })
        .await
        .unwrap();
    store
        .add_source(Source {
            source_id: Uuid::new_v4(),
            workspace_id: created.workspace_id,
            name: "api".to_string(),
            enabled: true,
        })
        .await
        .unwrap();

    service.delete(&created.workspace_id).await.unwrap();

    assert_matches!(
        service.get(&created.workspace_id).await.unwrap_err(),
        WorkspaceError::WorkspaceNotFound(_)
    );
    let tombstoned = store
        .get(&created.workspace_id, true)
        .await
        .unwrap()
        .unwrap();
    assert!(tombstoned.tombstone);

    let connections = ConnectionsManager::list_for_workspace(&*store, &created.workspace_id)
        .await
        .unwrap();
    assert!(!connections[0].enabled);
    let sources = SourcesManager::list_for_workspace(&*store, &created.workspace_id)
        .await
        .unwrap();
    assert!(!sources[0].enabled);
}
