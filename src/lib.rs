pub mod analytics;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod notification;
pub mod resources;
pub mod slug;
pub mod store;
pub mod workspaces;

pub use config::{AdminConfig, CliArgs};
pub use error::WorkspaceError;
pub use logging::{LoggingConfig, init_logging};
pub use model::{
    CustomerId, NotificationTryResponse, NotificationTryStatus, Workspace, WorkspaceCreate,
    WorkspaceId, WorkspaceRead, WorkspaceUpdate,
};
pub use notification::{Notification, NotificationChannel, NotificationType, SlackConfiguration};
pub use store::{JsonFileStore, MemoryWorkspaceStore, WorkspaceStore};
pub use workspaces::WorkspaceService;
