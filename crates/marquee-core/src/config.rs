//! Client configuration
//!
//! Resolution order for every setting: explicit override, then environment
//! variable, then default.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::{Error, Result};

pub const ENV_API_URL: &str = "MARQUEE_API_URL";
pub const ENV_TOKEN_PATH: &str = "MARQUEE_TOKEN_PATH";
pub const ENV_TIMEOUT_SECS: &str = "MARQUEE_TIMEOUT_SECS";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where a resolved value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Flag,
    Env,
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Flag => write!(f, "flag"),
            ConfigSource::Env => write!(f, "env"),
            ConfigSource::Default => write!(f, "default"),
        }
    }
}

/// Settings for talking to the backend
#[derive(Debug, Clone, Serialize)]
pub struct ClientConfig {
    /// Base URL of the REST API, without trailing slash
    pub api_url: String,
    pub api_url_source: ConfigSource,
    /// File holding the persisted bearer credential
    pub token_path: PathBuf,
    pub token_path_source: ConfigSource,
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Resolve configuration from the environment only
    pub fn from_env() -> Result<Self> {
        Self::resolve(None, None)
    }

    /// Resolve configuration, letting explicit values win over the environment
    pub fn resolve(api_url: Option<String>, token_path: Option<String>) -> Result<Self> {
        let (api_url, api_url_source) = match api_url {
            Some(url) => (url, ConfigSource::Flag),
            None => match std::env::var(ENV_API_URL) {
                Ok(url) if !url.trim().is_empty() => (url, ConfigSource::Env),
                _ => (DEFAULT_API_URL.to_string(), ConfigSource::Default),
            },
        };
        let api_url = normalize_api_url(&api_url)?;

        let (token_path, token_path_source) = match token_path {
            Some(path) => (expand_path(&path), ConfigSource::Flag),
            None => match std::env::var(ENV_TOKEN_PATH) {
                Ok(path) if !path.trim().is_empty() => (expand_path(&path), ConfigSource::Env),
                _ => (default_token_path()?, ConfigSource::Default),
            },
        };

        let timeout_secs = match std::env::var(ENV_TIMEOUT_SECS) {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(0) => {
                    return Err(Error::config(format!(
                        "{} must be greater than zero",
                        ENV_TIMEOUT_SECS
                    )))
                }
                Ok(secs) => secs,
                Err(_) => {
                    return Err(Error::config(format!(
                        "{} must be a number of seconds, got {:?}",
                        ENV_TIMEOUT_SECS, raw
                    )))
                }
            },
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_url,
            api_url_source,
            token_path,
            token_path_source,
            timeout_secs,
        })
    }
}

/// Default credential file inside the platform data directory
pub fn default_token_path() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("com", "marquee", "Marquee")
        .ok_or_else(|| Error::config("Could not determine project directories"))?;

    Ok(dirs.data_dir().join("credentials.json"))
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path.trim()).into_owned())
}

fn normalize_api_url(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(Error::config(format!(
            "API URL must start with http:// or https://, got {:?}",
            url
        )));
    }
    Ok(trimmed.to_string())
}
