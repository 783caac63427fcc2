//! CLI commands module
//!
//! Contains all CLI command implementations.

pub mod admin;
pub mod auth;
pub mod config;
pub mod movies;
pub mod profile;
pub mod reviews;
pub mod watchlist;

use std::sync::Arc;

use anyhow::{bail, Result};
use marquee_core::routes::{Page, RouteTable};
use marquee_core::{
    AuthStore, ClientConfig, FileTokenStore, HttpMovieApi, MovieApi, TokenStore, WatchlistStore,
};

use crate::output::OutputFormat;

/// Shared context for all commands
pub struct Context {
    pub config: ClientConfig,
    pub api: Arc<dyn MovieApi>,
    pub auth: AuthStore,
    pub watchlist: WatchlistStore,
    pub format: OutputFormat,
    pub quiet: bool,
}

impl Context {
    pub fn new(config: ClientConfig, format: OutputFormat, quiet: bool) -> Result<Self> {
        let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(&config.token_path));
        let api: Arc<dyn MovieApi> = Arc::new(HttpMovieApi::new(
            &config.api_url,
            config.timeout_secs,
            tokens.clone(),
        )?);

        Ok(Self {
            auth: AuthStore::new(api.clone(), tokens),
            watchlist: WatchlistStore::new(api.clone()),
            api,
            config,
            format,
            quiet,
        })
    }

    /// Resolve the session and check that one of `pages` is reachable.
    ///
    /// Without a stored credential the guest table applies. If the
    /// credential is rejected, guest pages stay usable.
    pub async fn require(&self, pages: &[Page]) -> Result<RouteTable> {
        if self.auth.has_token() {
            if let Err(e) = self.auth.fetch_auth().await {
                log::warn!("[cli] Session check failed: {}", e);
                if !pages.iter().any(|p| RouteTable::Guest.allows(*p)) {
                    bail!("Session could not be verified: {}", e);
                }
            }
        }

        let table = self.auth.route_table();
        if pages.iter().any(|p| table.allows(*p)) {
            return Ok(table);
        }

        match table {
            RouteTable::Guest => bail!(
                "Not signed in. Run `marquee auth login --token <TOKEN>` or `marquee auth signup`"
            ),
            _ => bail!(
                "This command is not available for role '{}'",
                self.auth.role()
            ),
        }
    }
}
