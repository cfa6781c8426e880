use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;

const DEFAULT_STATE_PATH: &str = "workspace-admin.json";
const DEFAULT_NOTIFICATION_TIMEOUT_SECS: u64 = 10;

/// Resolved configuration: CLI flags win over the config file, the config
/// file wins over defaults.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub state_path: PathBuf,
    pub analytics_enabled: bool,
    pub notification_timeout: Duration,
}

impl AdminConfig {
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let CliArgs {
            config,
            state: cli_state,
            notification_timeout: cli_timeout,
            no_analytics,
        } = args;

        let file_config = if let Some(path) = config.as_ref() {
            load_config_file(path)?
        } else {
            PartialConfig::default()
        };

        let PartialConfig {
            state_path: file_state,
            notification_timeout_secs: file_timeout,
            analytics: file_analytics,
        } = file_config;

        let state_path = cli_state
            .or(file_state)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_PATH));

        let timeout_secs = cli_timeout
            .or(file_timeout)
            .unwrap_or(DEFAULT_NOTIFICATION_TIMEOUT_SECS)
            .max(1);

        let analytics_enabled = if no_analytics {
            false
        } else {
            file_analytics.unwrap_or(true)
        };

        Ok(Self {
            state_path,
            analytics_enabled,
            notification_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[derive(Args, Debug, Default, Clone)]
pub struct CliArgs {
    #[arg(
        long,
        value_name = "FILE",
        help = "Path to a configuration file (YAML or JSON)",
        global = true
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        env = "WORKSPACE_ADMIN_STATE",
        value_name = "FILE",
        help = "Path to the JSON state file",
        global = true
    )]
    pub state: Option<PathBuf>,

    #[arg(
        long,
        env = "WORKSPACE_ADMIN_NOTIFICATION_TIMEOUT",
        value_name = "SECS",
        help = "Timeout for notification test deliveries",
        global = true
    )]
    pub notification_timeout: Option<u64>,

    #[arg(
        long,
        env = "WORKSPACE_ADMIN_NO_ANALYTICS",
        help = "Disable the analytics identify side effect",
        global = true
    )]
    pub no_analytics: bool,
}

#[derive(Debug, Default, Deserialize)]
struct PartialConfig {
    state_path: Option<PathBuf>,
    notification_timeout_secs: Option<u64>,
    analytics: Option<bool>,
}

fn load_config_file(path: &Path) -> Result<PartialConfig> {
    if !path.exists() {
        anyhow::bail!("config file {:?} does not exist", path);
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {path:?}"))?;
    let ext = path
        .extension()
        .and_then(|os| os.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse YAML config {path:?}"))?,
        "json" => serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse JSON config {path:?}"))?,
        other => anyhow::bail!("unsupported config extension: {other}"),
    };
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_apply_without_flags_or_file() {
        let config = AdminConfig::from_args(CliArgs::default()).unwrap();
        assert_eq!(config.state_path, PathBuf::from(DEFAULT_STATE_PATH));
        assert!(config.analytics_enabled);
        assert_eq!(config.notification_timeout, Duration::from_secs(10));
    }

    #[test]
    fn cli_flags_override_the_config_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "state_path: /tmp/from-file.json\nnotification_timeout_secs: 3\nanalytics: false"
        )
        .unwrap();

        let args = CliArgs {
            config: Some(file.path().to_path_buf()),
            state: Some(PathBuf::from("/tmp/from-cli.json")),
            notification_timeout: None,
            no_analytics: false,
        };
        let config = AdminConfig::from_args(args).unwrap();
        assert_eq!(config.state_path, PathBuf::from("/tmp/from-cli.json"));
        assert_eq!(config.notification_timeout, Duration::from_secs(3));
        assert!(!config.analytics_enabled);
    }

    #[test]
    fn unknown_config_extension_is_rejected() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let args = CliArgs {
            config: Some(file.path().to_path_buf()),
            ..CliArgs::default()
        };
        assert!(AdminConfig::from_args(args).is_err());
    }
}
