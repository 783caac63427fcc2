//! Watchlist state
//!
//! Two views of the same list are kept side by side:
//!
//! - `ids`: which movies are on the list. Cheap to fetch, drives the
//!   bookmark toggle on every movie card.
//! - `movies`: hydrated summaries for the watchlist page.
//!
//! After [`WatchlistStore::fetch_watchlist`] both describe the same set.
//! After an id refresh or an add-toggle, `ids` may run ahead of `movies`
//! until the next full fetch.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use crate::api::MovieApi;
use crate::error::{Error, Result};
use crate::models::WatchlistMovie;
use crate::store::{Reducer, Store};

pub const TOGGLE_FALLBACK_MESSAGE: &str = "Failed to toggle watchlist";
pub const FETCH_IDS_FALLBACK_MESSAGE: &str = "Failed to fetch watchlist IDs";
pub const FETCH_FALLBACK_MESSAGE: &str = "Failed to fetch watchlist";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WatchlistState {
    /// Membership, in insertion order, without duplicates
    pub ids: Vec<String>,
    pub movies: Vec<WatchlistMovie>,
    pub loading: bool,
    pub error: Option<String>,
}

impl WatchlistState {
    pub fn contains(&self, movie_id: &str) -> bool {
        self.ids.iter().any(|id| id == movie_id)
    }

    /// Distinct genres across the hydrated movies, sorted
    pub fn genres(&self) -> Vec<String> {
        let mut genres: Vec<String> = self
            .movies
            .iter()
            .flat_map(|m| m.genres.iter().cloned())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        genres.sort();
        genres
    }

    /// Hydrated movies tagged with `genre`, compared case-insensitively.
    /// An empty genre selects everything.
    pub fn movies_in_genre(&self, genre: &str) -> Vec<WatchlistMovie> {
        let genre = genre.trim().to_lowercase();
        if genre.is_empty() {
            return self.movies.clone();
        }
        self.movies
            .iter()
            .filter(|m| m.genres.iter().any(|g| g.to_lowercase() == genre))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone)]
pub enum WatchlistAction {
    /// Any request started
    Pending,
    Toggled { movie_id: String, removed: bool },
    IdsLoaded(Vec<String>),
    MoviesLoaded(Vec<WatchlistMovie>),
    Failed(String),
    ClearError,
    Clear,
}

pub struct WatchlistReducer;

impl Reducer for WatchlistReducer {
    type State = WatchlistState;
    type Action = WatchlistAction;

    fn reduce(state: &mut WatchlistState, action: WatchlistAction) {
        match action {
            WatchlistAction::Pending => {
                state.loading = true;
                state.error = None;
            }
            WatchlistAction::Toggled { movie_id, removed } => {
                state.loading = false;
                if removed {
                    state.ids.retain(|id| *id != movie_id);
                    state.movies.retain(|m| m.id != movie_id);
                } else if !state.contains(&movie_id) {
                    state.ids.push(movie_id);
                }
            }
            WatchlistAction::IdsLoaded(ids) => {
                state.loading = false;
                state.ids = dedup(ids);
            }
            WatchlistAction::MoviesLoaded(movies) => {
                state.loading = false;
                state.ids = dedup(movies.iter().map(|m| m.id.clone()).collect());
                state.movies = movies;
            }
            WatchlistAction::Failed(message) => {
                state.loading = false;
                state.error = Some(message);
            }
            WatchlistAction::ClearError => {
                state.error = None;
            }
            WatchlistAction::Clear => {
                state.ids.clear();
                state.movies.clear();
            }
        }
    }
}

fn dedup(ids: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

/// Watchlist container synchronized with the backend
pub struct WatchlistStore {
    store: Store<WatchlistReducer>,
    api: Arc<dyn MovieApi>,
}

impl WatchlistStore {
    pub fn new(api: Arc<dyn MovieApi>) -> Self {
        Self {
            store: Store::new(),
            api,
        }
    }

    /// Flip membership of `movie_id` on the server and mirror the result.
    ///
    /// Returns `true` when the movie was removed. Adding only touches the
    /// id list; the movie summary shows up on the next full fetch.
    pub async fn toggle_watchlist(&self, movie_id: &str) -> Result<bool> {
        self.store.dispatch(WatchlistAction::Pending);
        log::debug!("[watchlist] Toggling {}", movie_id);

        match self.api.toggle_watchlist(movie_id).await {
            Ok(resp) => {
                self.store.dispatch(WatchlistAction::Toggled {
                    movie_id: movie_id.to_string(),
                    removed: resp.removed,
                });
                log::info!(
                    "[watchlist] {} {}",
                    if resp.removed { "Removed" } else { "Added" },
                    movie_id
                );
                Ok(resp.removed)
            }
            Err(e) => Err(self.fail(e, TOGGLE_FALLBACK_MESSAGE)),
        }
    }

    /// Replace the id list with the server's
    pub async fn fetch_watchlisted_ids(&self) -> Result<Vec<String>> {
        self.store.dispatch(WatchlistAction::Pending);
        log::debug!("[watchlist] Fetching ids");

        match self.api.watchlist_ids().await {
            Ok(resp) => {
                self.store
                    .dispatch(WatchlistAction::IdsLoaded(resp.watch_list_ids));
                Ok(self.ids())
            }
            Err(e) => Err(self.fail(e, FETCH_IDS_FALLBACK_MESSAGE)),
        }
    }

    /// Replace both the hydrated list and the ids with the server's
    pub async fn fetch_watchlist(&self) -> Result<Vec<WatchlistMovie>> {
        self.store.dispatch(WatchlistAction::Pending);
        log::debug!("[watchlist] Fetching full watchlist");

        match self.api.watchlist().await {
            Ok(resp) => {
                let movies: Vec<WatchlistMovie> = resp
                    .watch_list
                    .unwrap_or_default()
                    .into_iter()
                    .map(|entry| entry.movies)
                    .collect();
                log::debug!("[watchlist] Loaded {} movies", movies.len());
                self.store
                    .dispatch(WatchlistAction::MoviesLoaded(movies.clone()));
                Ok(movies)
            }
            Err(e) => Err(self.fail(e, FETCH_FALLBACK_MESSAGE)),
        }
    }

    pub fn clear_error(&self) {
        self.store.dispatch(WatchlistAction::ClearError);
    }

    pub fn clear_watchlist(&self) {
        self.store.dispatch(WatchlistAction::Clear);
    }

    fn fail(&self, error: Error, fallback: &str) -> Error {
        let message = error.to_string();
        let message = if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        };
        log::warn!("[watchlist] {}", message);
        self.store.dispatch(WatchlistAction::Failed(message));
        error
    }

    pub fn state(&self) -> WatchlistState {
        self.store.state()
    }

    pub fn ids(&self) -> Vec<String> {
        self.store.select(|s| s.ids.clone())
    }

    pub fn movies(&self) -> Vec<WatchlistMovie> {
        self.store.select(|s| s.movies.clone())
    }

    pub fn loading(&self) -> bool {
        self.store.select(|s| s.loading)
    }

    pub fn error(&self) -> Option<String> {
        self.store.select(|s| s.error.clone())
    }

    pub fn is_watchlisted(&self, movie_id: &str) -> bool {
        self.store.select(|s| s.contains(movie_id))
    }

    pub fn genres(&self) -> Vec<String> {
        self.store.select(WatchlistState::genres)
    }

    pub fn movies_in_genre(&self, genre: &str) -> Vec<WatchlistMovie> {
        self.store.select(|s| s.movies_in_genre(genre))
    }

    pub fn subscribe(&self) -> watch::Receiver<WatchlistState> {
        self.store.subscribe()
    }
}
