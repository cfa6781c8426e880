//! Notification configuration and transient delivery channels.
//!
//! A [`Notification`] is a tagged configuration value stored on the
//! workspace record. [`NotificationChannel`] is the transient channel built
//! from one: an enum over the channel kinds this crate can actually drive,
//! produced by a fallible factory that rejects tags it has no client for.

use std::time::Duration;

use anyhow::Context;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::WorkspaceError;

/// Type tag selecting the delivery mechanism.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationType {
    Slack,
    Customerio,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SlackConfiguration {
    pub webhook: String,
}

/// A single notification configuration as stored on a workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Notification {
    pub notification_type: NotificationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slack_configuration: Option<SlackConfiguration>,
}

impl Notification {
    pub fn slack(webhook: impl Into<String>) -> Self {
        Self {
            notification_type: NotificationType::Slack,
            slack_configuration: Some(SlackConfiguration {
                webhook: webhook.into(),
            }),
        }
    }
}

/// Delivery-level failure while sending through an otherwise valid channel.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// A transient channel built from a [`Notification`].
///
/// Only kinds with a working client appear as variants; building from a tag
/// without one fails with an error naming the type.
#[derive(Debug)]
pub enum NotificationChannel {
    Slack(SlackChannel),
}

impl NotificationChannel {
    /// Map a configuration's type tag to a channel, or fail.
    ///
    /// Configuration problems (unsupported tag, missing settings block) are
    /// the only errors here; delivery problems surface later from `send`.
    pub fn build(
        notification: &Notification,
        timeout: Duration,
    ) -> Result<Self, WorkspaceError> {
        match notification.notification_type {
            NotificationType::Slack => {
                let config = notification.slack_configuration.as_ref().ok_or_else(|| {
                    WorkspaceError::InvalidNotification {
                        notification_type: NotificationType::Slack,
                        reason: "slack_configuration is missing".to_string(),
                    }
                })?;
                Ok(Self::Slack(SlackChannel::new(config.webhook.clone(), timeout)?))
            }
            other => Err(WorkspaceError::InvalidNotification {
                notification_type: other,
                reason: "no client implemented for this type".to_string(),
            }),
        }
    }

    /// Send a message, reporting whether the channel confirmed delivery.
    pub async fn send(&self, message: &str) -> Result<bool, SendError> {
        match self {
            NotificationChannel::Slack(channel) => channel.send(message).await,
        }
    }
}

/// Slack-style incoming-webhook channel.
///
/// Delivery is confirmed by a 2xx response to the webhook POST.
#[derive(Debug)]
pub struct SlackChannel {
    client: reqwest::Client,
    webhook: String,
}

impl SlackChannel {
    fn new(webhook: String, timeout: Duration) -> Result<Self, WorkspaceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build webhook http client")?;
        Ok(Self { client, webhook })
    }

    async fn send(&self, message: &str) -> Result<bool, SendError> {
        let payload = serde_json::json!({ "text": message });
        let response = self.client.post(&self.webhook).json(&payload).send().await?;
        let delivered = response.status().is_success();
        debug!(status = %response.status(), delivered, "webhook post completed");
        Ok(delivered)
    }
}

/// Fixed test message sent by the notification probe.
pub fn test_message(notification_type: NotificationType) -> String {
    format!(
        "Hello! This is a test message to verify your {notification_type} notification settings"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn type_tags_render_snake_case() {
        assert_eq!(NotificationType::Slack.to_string(), "slack");
        assert_eq!(NotificationType::Customerio.to_string(), "customerio");
    }

    #[test]
    fn build_rejects_types_without_a_client() {
        let notification = Notification {
            notification_type: NotificationType::Customerio,
            slack_configuration: None,
        };
        let err = NotificationChannel::build(&notification, Duration::from_secs(1)).unwrap_err();
        assert_matches!(
            err,
            WorkspaceError::InvalidNotification {
                notification_type: NotificationType::Customerio,
                ..
            }
        );
        assert!(err.to_string().contains("customerio"));
    }

    #[test]
    fn build_rejects_missing_slack_settings() {
        let notification = Notification {
            notification_type: NotificationType::Slack,
            slack_configuration: None,
        };
        let err = NotificationChannel::build(&notification, Duration::from_secs(1)).unwrap_err();
        assert_matches!(
            err,
            WorkspaceError::InvalidNotification {
                notification_type: NotificationType::Slack,
                ..
            }
        );
    }

    #[test]
    fn test_message_names_the_type() {
        assert!(test_message(NotificationType::Slack).contains("slack"));
    }

    #[test]
    fn notification_config_round_trips() {
        let notification = Notification::slack("https://hooks.example.test/T123");
        let json = serde_json::to_string(&notification).unwrap();
        assert!(json.contains("\"notification_type\":\"slack\""));
        let parsed: Notification = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, notification);
    }
}
