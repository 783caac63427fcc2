//! Integration test: a signed-in session driving both state containers
//! with the credential persisted on disk

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use marquee_core::api::MovieApi;
use marquee_core::auth::{AuthStatus, AuthStore, FileTokenStore, TokenStore, TOKEN_KEY};
use marquee_core::catalog::MovieQuery;
use marquee_core::models::{
    MeResponse, MovieDetails, MoviesPage, NewMovie, ReviewHistoryEntry, ReviewSubmission,
    ReviewsPage, Role, SignUpData, SignUpResponse, ToggleResponse, User, UserProfile,
    WatchlistEntry, WatchlistIdsResponse, WatchlistMovie, WatchlistResponse,
};
use marquee_core::routes::{Page, RouteTable};
use marquee_core::watchlist::WatchlistStore;
use marquee_core::{Error, Result};
use tempfile::TempDir;

/// In-memory backend holding one user's watchlist
struct FakeBackend {
    role: Role,
    catalog: Vec<WatchlistMovie>,
    listed: Mutex<Vec<String>>,
    fail_toggles: Mutex<bool>,
}

impl FakeBackend {
    fn new(role: Role) -> Self {
        let catalog = ["m1", "m2", "m3"]
            .iter()
            .map(|id| WatchlistMovie {
                id: id.to_string(),
                title: format!("Title {}", id),
                poster_url: None,
                release_year: None,
                genres: vec![if *id == "m2" { "Comedy" } else { "Drama" }.to_string()],
                average_rating: Some(3.5),
                synopsis: None,
            })
            .collect();
        Self {
            role,
            catalog,
            listed: Mutex::new(vec!["m1".to_string()]),
            fail_toggles: Mutex::new(false),
        }
    }
}

fn unsupported<T>() -> Result<T> {
    Err(Error::internal("not used in this test"))
}

#[async_trait]
impl MovieApi for FakeBackend {
    async fn fetch_me(&self) -> Result<MeResponse> {
        Ok(MeResponse {
            token: "refreshed-token".to_string(),
            user: User {
                id: "u1".to_string(),
                role: self.role,
                is_admin: self.role == Role::Admin,
            },
        })
    }

    async fn sign_up(&self, _data: &SignUpData) -> Result<SignUpResponse> {
        unsupported()
    }

    async fn list_movies(&self, _query: &MovieQuery) -> Result<MoviesPage> {
        unsupported()
    }

    async fn get_movie(&self, _movie_id: &str) -> Result<MovieDetails> {
        unsupported()
    }

    async fn list_reviews(&self, _movie_id: &str, _page: u32) -> Result<ReviewsPage> {
        unsupported()
    }

    async fn submit_review(&self, _movie_id: &str, _review: &ReviewSubmission) -> Result<()> {
        unsupported()
    }

    async fn user_reviews(&self) -> Result<Vec<ReviewHistoryEntry>> {
        unsupported()
    }

    async fn toggle_watchlist(&self, movie_id: &str) -> Result<ToggleResponse> {
        if *self.fail_toggles.lock().unwrap() {
            return Err(Error::api(500, "Failed to toggle watchlist"));
        }
        let mut listed = self.listed.lock().unwrap();
        if let Some(pos) = listed.iter().position(|id| id == movie_id) {
            listed.remove(pos);
            Ok(ToggleResponse { removed: true })
        } else {
            listed.push(movie_id.to_string());
            Ok(ToggleResponse { removed: false })
        }
    }

    async fn watchlist_ids(&self) -> Result<WatchlistIdsResponse> {
        Ok(WatchlistIdsResponse {
            watch_list_ids: self.listed.lock().unwrap().clone(),
        })
    }

    async fn watchlist(&self) -> Result<WatchlistResponse> {
        let listed = self.listed.lock().unwrap().clone();
        let entries: Vec<WatchlistEntry> = listed
            .iter()
            .filter_map(|id| self.catalog.iter().find(|m| &m.id == id))
            .enumerate()
            .map(|(i, m)| WatchlistEntry {
                id: format!("row-{}", i),
                movies: m.clone(),
            })
            .collect();
        Ok(WatchlistResponse {
            watch_list: if entries.is_empty() { None } else { Some(entries) },
        })
    }

    async fn profile(&self) -> Result<UserProfile> {
        unsupported()
    }

    async fn update_name(&self, _name: &str) -> Result<UserProfile> {
        unsupported()
    }

    async fn update_email(&self, _email: &str) -> Result<UserProfile> {
        unsupported()
    }

    async fn create_movie(&self, _movie: &NewMovie) -> Result<()> {
        unsupported()
    }
}

fn read_credentials(path: &std::path::Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn test_login_sync_and_logout() {
    let temp_dir = TempDir::new().unwrap();
    let creds = temp_dir.path().join("credentials.json");
    let tokens = Arc::new(FileTokenStore::new(&creds));
    let backend = Arc::new(FakeBackend::new(Role::User));

    let auth = AuthStore::new(backend.clone(), tokens.clone());
    let watchlist = WatchlistStore::new(backend.clone());

    // Guest until resolved
    assert_eq!(auth.route_table(), RouteTable::Guest);

    auth.login_with_token("pasted-token").await.unwrap();
    assert_eq!(auth.status(), AuthStatus::Succeeded);
    assert_eq!(read_credentials(&creds)[TOKEN_KEY], "refreshed-token");
    assert!(auth.route_table().allows(Page::Watchlist));

    // Ids first, then a toggle that adds, then the full fetch
    watchlist.fetch_watchlisted_ids().await.unwrap();
    assert_eq!(watchlist.ids(), vec!["m1"]);

    assert!(!watchlist.toggle_watchlist("m2").await.unwrap());
    assert_eq!(watchlist.ids(), vec!["m1", "m2"]);
    assert!(watchlist.movies().is_empty());

    watchlist.fetch_watchlist().await.unwrap();
    let hydrated: HashSet<String> = watchlist.movies().into_iter().map(|m| m.id).collect();
    let ids: HashSet<String> = watchlist.ids().into_iter().collect();
    assert_eq!(hydrated, ids);
    assert_eq!(watchlist.genres(), vec!["Comedy", "Drama"]);

    // Removing drops the movie from both views
    assert!(watchlist.toggle_watchlist("m1").await.unwrap());
    assert_eq!(watchlist.ids(), vec!["m2"]);
    assert_eq!(watchlist.movies().len(), 1);

    // A failing toggle leaves everything as it was
    *backend.fail_toggles.lock().unwrap() = true;
    let before = watchlist.state();
    assert!(watchlist.toggle_watchlist("m2").await.is_err());
    let after = watchlist.state();
    assert_eq!(after.ids, before.ids);
    assert_eq!(after.movies, before.movies);
    assert_eq!(after.error.as_deref(), Some("Failed to toggle watchlist"));

    auth.logout();
    watchlist.clear_watchlist();

    assert_eq!(auth.status(), AuthStatus::Idle);
    assert!(auth.user().is_none());
    assert!(tokens.get().is_none());
    assert!(read_credentials(&creds).get(TOKEN_KEY).is_none());
    assert!(watchlist.ids().is_empty());
    assert_eq!(auth.route_table(), RouteTable::Guest);
}

#[tokio::test]
async fn test_admin_session_routes() {
    let temp_dir = TempDir::new().unwrap();
    let tokens = Arc::new(FileTokenStore::new(temp_dir.path().join("creds.json")));
    let auth = AuthStore::new(Arc::new(FakeBackend::new(Role::Admin)), tokens);

    auth.fetch_auth().await.unwrap();

    let table = auth.route_table();
    assert_eq!(table, RouteTable::Admin);
    assert_eq!(table.resolve("/movies").page, Page::AdminMovies);
    assert_eq!(table.resolve("/account/watchlist").page, Page::NotFound);
}
