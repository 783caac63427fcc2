//! Authentication state
//!
//! [`AuthStore`] tracks whether the current session has been resolved
//! against `/api/auth/me` and who the user is. Its role decides which
//! [`RouteTable`] the front end serves.
//!
//! ```text
//!   Idle ──fetch_auth──► Loading ──ok──► Succeeded (user set)
//!    ▲                      │
//!    │                      └──err──► Failed (error set, user kept)
//!    └──────────── logout (from any state) ────────────┘
//! ```

mod token;

pub use token::{FileTokenStore, MemoryTokenStore, TokenStore, TOKEN_KEY};

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use crate::api::MovieApi;
use crate::error::{Error, Result};
use crate::models::{Role, SignUpData, User};
use crate::routes::RouteTable;
use crate::store::{Reducer, Store};

/// Message recorded when a failed fetch carries no text of its own
pub const AUTH_FALLBACK_MESSAGE: &str = "Something went wrong";

/// Resolution status of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl std::fmt::Display for AuthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthStatus::Idle => write!(f, "idle"),
            AuthStatus::Loading => write!(f, "loading"),
            AuthStatus::Succeeded => write!(f, "succeeded"),
            AuthStatus::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AuthState {
    pub status: AuthStatus,
    pub user: Option<User>,
    pub error: Option<String>,
}

impl AuthState {
    /// Role for routing; no user means guest
    pub fn role(&self) -> Role {
        self.user.as_ref().map(|u| u.role).unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub enum AuthAction {
    FetchPending,
    FetchFulfilled(User),
    FetchRejected(String),
    Logout,
}

pub struct AuthReducer;

impl Reducer for AuthReducer {
    type State = AuthState;
    type Action = AuthAction;

    fn reduce(state: &mut AuthState, action: AuthAction) {
        match action {
            AuthAction::FetchPending => {
                state.status = AuthStatus::Loading;
            }
            AuthAction::FetchFulfilled(user) => {
                state.status = AuthStatus::Succeeded;
                state.user = Some(user);
                state.error = None;
            }
            AuthAction::FetchRejected(message) => {
                state.status = AuthStatus::Failed;
                state.error = Some(if message.trim().is_empty() {
                    AUTH_FALLBACK_MESSAGE.to_string()
                } else {
                    message
                });
            }
            AuthAction::Logout => {
                *state = AuthState::default();
            }
        }
    }
}

/// Session container backed by the API and a credential store
pub struct AuthStore {
    store: Store<AuthReducer>,
    api: Arc<dyn MovieApi>,
    tokens: Arc<dyn TokenStore>,
}

impl AuthStore {
    pub fn new(api: Arc<dyn MovieApi>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            store: Store::new(),
            api,
            tokens,
        }
    }

    /// Resolve the session with `GET /api/auth/me`.
    ///
    /// On success the refreshed token replaces the stored one. On failure
    /// the previous user is left in place and the message is recorded.
    pub async fn fetch_auth(&self) -> Result<User> {
        self.store.dispatch(AuthAction::FetchPending);
        log::debug!("[auth] Fetching current user");

        match self.api.fetch_me().await {
            Ok(me) => {
                if let Err(e) = self.tokens.set(&me.token) {
                    log::warn!("[auth] Could not persist refreshed token: {}", e);
                }
                log::info!("[auth] Signed in as {} ({})", me.user.id, me.user.role);
                self.store
                    .dispatch(AuthAction::FetchFulfilled(me.user.clone()));
                Ok(me.user)
            }
            Err(e) => {
                log::warn!("[auth] fetch_auth failed: {}", e);
                self.store.dispatch(AuthAction::FetchRejected(e.to_string()));
                Err(e)
            }
        }
    }

    /// Forget the credential and return to `Idle`. No network call.
    pub fn logout(&self) {
        if let Err(e) = self.tokens.clear() {
            log::warn!("[auth] Could not clear stored token: {}", e);
        }
        self.store.dispatch(AuthAction::Logout);
        log::info!("[auth] Logged out");
    }

    /// Store a credential obtained elsewhere, then resolve the session
    pub async fn login_with_token(&self, token: &str) -> Result<User> {
        let token = token.trim();
        if token.is_empty() {
            return Err(Error::validation("Token must not be empty"));
        }
        self.tokens.set(token)?;
        self.fetch_auth().await
    }

    /// Create an account, keep its token and resolve the session
    pub async fn sign_up(&self, data: &SignUpData) -> Result<User> {
        log::debug!("[auth] Signing up {}", data.email);
        let resp = self.api.sign_up(data).await?;
        self.tokens.set(&resp.token)?;
        self.fetch_auth().await
    }

    pub fn has_token(&self) -> bool {
        self.tokens.get().is_some()
    }

    pub fn state(&self) -> AuthState {
        self.store.state()
    }

    pub fn status(&self) -> AuthStatus {
        self.store.select(|s| s.status)
    }

    pub fn user(&self) -> Option<User> {
        self.store.select(|s| s.user.clone())
    }

    pub fn error(&self) -> Option<String> {
        self.store.select(|s| s.error.clone())
    }

    pub fn role(&self) -> Role {
        self.store.select(AuthState::role)
    }

    pub fn route_table(&self) -> RouteTable {
        RouteTable::for_role(self.role())
    }

    pub fn is_authenticated(&self) -> bool {
        self.store
            .select(|s| s.status == AuthStatus::Succeeded && s.user.is_some())
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.store.subscribe()
    }
}
