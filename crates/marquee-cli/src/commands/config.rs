//! Config commands
//!
//! Shows the resolved client configuration and where each value came from.

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use tabled::Tabled;

use marquee_core::config::{ConfigSource, ENV_API_URL, ENV_TIMEOUT_SECS, ENV_TOKEN_PATH};

use super::Context;
use crate::output::{print_error, print_info, print_output};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
}

/// Config row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

pub async fn execute(ctx: &Context, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => print_output(&config_rows(ctx), ctx.format),
        ConfigAction::Get { key } => {
            let rows = config_rows(ctx);
            match rows.iter().find(|r| r.key.eq_ignore_ascii_case(&key)) {
                Some(row) => print_info(&row.value, false),
                None => print_error(&format!("Config key not found: {}", key)),
            }
            Ok(())
        }
    }
}

fn config_rows(ctx: &Context) -> Vec<ConfigRow> {
    let config = &ctx.config;
    let timeout_source = if std::env::var(ENV_TIMEOUT_SECS).is_ok() {
        ConfigSource::Env
    } else {
        ConfigSource::Default
    };

    vec![
        ConfigRow {
            key: ENV_API_URL.to_string(),
            value: config.api_url.clone(),
            source: config.api_url_source.to_string(),
        },
        ConfigRow {
            key: ENV_TOKEN_PATH.to_string(),
            value: config.token_path.to_string_lossy().to_string(),
            source: config.token_path_source.to_string(),
        },
        ConfigRow {
            key: ENV_TIMEOUT_SECS.to_string(),
            value: config.timeout_secs.to_string(),
            source: timeout_source.to_string(),
        },
        ConfigRow {
            key: "signed_in".to_string(),
            value: if ctx.auth.has_token() { "yes" } else { "no" }.to_string(),
            source: "credentials".to_string(),
        },
    ]
}
