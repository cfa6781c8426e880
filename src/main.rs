use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use workspace_admin::analytics::{AnalyticsSink, NoopAnalytics, TracingAnalytics};
use workspace_admin::{
    AdminConfig, CliArgs, JsonFileStore, LoggingConfig, Notification, WorkspaceCreate,
    WorkspaceId, WorkspaceService, WorkspaceUpdate, init_logging,
};

#[derive(Parser, Debug)]
#[command(name = "workspace-admin", about = "Workspace lifecycle administration", version)]
struct Cli {
    #[command(flatten)]
    args: CliArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a workspace
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, value_name = "BOOL")]
        anonymous_data_collection: Option<bool>,
        #[arg(long, value_name = "BOOL")]
        news: Option<bool>,
        #[arg(long, value_name = "BOOL")]
        security_updates: Option<bool>,
        #[arg(long, value_name = "JSON", help = "Notification configurations as a JSON array")]
        notifications: Option<String>,
    },
    /// List non-deleted workspaces
    List,
    /// Fetch a workspace by id
    Get {
        #[arg(value_name = "ID")]
        workspace_id: Uuid,
    },
    /// Fetch a workspace by slug
    GetBySlug {
        #[arg(value_name = "SLUG")]
        slug: String,
    },
    /// Overwrite workspace settings (supply current values for fields you
    /// do not intend to change)
    Update {
        #[arg(value_name = "ID")]
        workspace_id: Uuid,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set, default_value_t = false)]
        initial_setup_complete: bool,
        #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set, default_value_t = false)]
        display_setup_wizard: bool,
        #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set, default_value_t = false)]
        anonymous_data_collection: bool,
        #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set, default_value_t = false)]
        news: bool,
        #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set, default_value_t = false)]
        security_updates: bool,
        #[arg(long, value_name = "JSON", help = "Replacement notification list as a JSON array")]
        notifications: Option<String>,
    },
    /// Soft-delete a workspace after deactivating its resources
    Delete {
        #[arg(value_name = "ID")]
        workspace_id: Uuid,
    },
    /// Send a test message through a notification configuration
    TryNotification {
        #[arg(long, value_name = "JSON")]
        notification: String,
    },
}

fn parse_notifications(raw: Option<String>) -> Result<Vec<Notification>> {
    match raw {
        Some(json) => {
            serde_json::from_str(&json).context("failed to parse notifications JSON array")
        }
        None => Ok(Vec::new()),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging(LoggingConfig::from_env())?;

    let cli = Cli::parse();
    let config = AdminConfig::from_args(cli.args)?;

    let store = Arc::new(JsonFileStore::new(&config.state_path));
    let analytics: Arc<dyn AnalyticsSink> = if config.analytics_enabled {
        Arc::new(TracingAnalytics)
    } else {
        Arc::new(NoopAnalytics)
    };

    let service = WorkspaceService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store,
        analytics,
    )
    .with_notification_timeout(config.notification_timeout);

    match cli.command {
        Command::Create {
            name,
            email,
            anonymous_data_collection,
            news,
            security_updates,
            notifications,
        } => {
            let created = service
                .create(WorkspaceCreate {
                    name,
                    email,
                    anonymous_data_collection,
                    news,
                    security_updates,
                    notifications: parse_notifications(notifications)?,
                })
                .await?;
            print_json(&created)?;
        }
        Command::List => {
            let workspaces = service.list().await?;
            print_json(&workspaces)?;
        }
        Command::Get { workspace_id } => {
            let workspace = service.get(&WorkspaceId(workspace_id)).await?;
            print_json(&workspace)?;
        }
        Command::GetBySlug { slug } => {
            let workspace = service.get_by_slug(&slug).await?;
            print_json(&workspace)?;
        }
        Command::Update {
            workspace_id,
            email,
            initial_setup_complete,
            display_setup_wizard,
            anonymous_data_collection,
            news,
            security_updates,
            notifications,
        } => {
            let updated = service
                .update(WorkspaceUpdate {
                    workspace_id: WorkspaceId(workspace_id),
                    email,
                    initial_setup_complete,
                    display_setup_wizard,
                    anonymous_data_collection,
                    news,
                    security_updates,
                    notifications: parse_notifications(notifications)?,
                })
                .await?;
            print_json(&updated)?;
        }
        Command::Delete { workspace_id } => {
            service.delete(&WorkspaceId(workspace_id)).await?;
            println!("deleted {workspace_id}");
        }
        Command::TryNotification { notification } => {
            let notification: Notification = serde_json::from_str(&notification)
                .context("failed to parse notification JSON")?;
            let outcome = service.try_notification(&notification).await?;
            print_json(&outcome)?;
        }
    }

    Ok(())
}
