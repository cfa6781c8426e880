//! Structured logging setup.
//!
//! JSON output for production, pretty output otherwise, selected by the
//! `ENVIRONMENT`/`ENV` variables and overridable with
//! `WORKSPACE_ADMIN_LOG_FORMAT`. Filtering follows `RUST_LOG`.

use std::env;
use std::io;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub default_directive: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("ENV"))
            .unwrap_or_else(|_| "development".to_string());
        let is_production = environment == "production" || environment == "prod";

        Self {
            format: if is_production {
                LogFormat::Json
            } else {
                LogFormat::Pretty
            },
            default_directive: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(format) = env::var("WORKSPACE_ADMIN_LOG_FORMAT") {
            match format.to_ascii_lowercase().as_str() {
                "json" => config.format = LogFormat::Json,
                "pretty" => config.format = LogFormat::Pretty,
                _ => {}
            }
        }
        config
    }
}

/// Install the global subscriber. Call once, at process start.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive.clone()));

    match config.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(io::stderr))
                .try_init()?;
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(io::stderr))
                .try_init()?;
        }
    }
    Ok(())
}
