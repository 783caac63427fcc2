//! Scripted [`MovieApi`] for unit tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::MovieApi;
use crate::catalog::MovieQuery;
use crate::error::{Error, Result};
use crate::models::{
    MeResponse, MovieDetails, MoviesPage, NewMovie, ReviewHistoryEntry, ReviewSubmission,
    ReviewsPage, SignUpData, SignUpResponse, ToggleResponse, UserProfile, WatchlistIdsResponse,
    WatchlistResponse,
};

type Queue<T> = Mutex<VecDeque<Result<T>>>;

/// Every call pops the next queued response for its endpoint and records
/// its name. An empty queue answers with an internal error.
#[derive(Default)]
pub struct FakeMovieApi {
    pub me: Queue<MeResponse>,
    pub sign_up: Queue<SignUpResponse>,
    pub movies: Queue<MoviesPage>,
    pub movie: Queue<MovieDetails>,
    pub reviews: Queue<ReviewsPage>,
    pub submit_review: Queue<()>,
    pub user_reviews: Queue<Vec<ReviewHistoryEntry>>,
    pub toggle: Queue<ToggleResponse>,
    pub watchlist_ids: Queue<WatchlistIdsResponse>,
    pub watchlist: Queue<WatchlistResponse>,
    pub profile: Queue<UserProfile>,
    pub create_movie: Queue<()>,
    pub calls: Mutex<Vec<String>>,
}

pub fn push<T>(queue: &Queue<T>, response: Result<T>) {
    queue.lock().unwrap().push_back(response);
}

impl FakeMovieApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn next<T>(&self, name: &str, queue: &Queue<T>) -> Result<T> {
        self.calls.lock().unwrap().push(name.to_string());
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::internal(format!("no response queued for {}", name))))
    }
}

#[async_trait]
impl MovieApi for FakeMovieApi {
    async fn fetch_me(&self) -> Result<MeResponse> {
        self.next("fetch_me", &self.me)
    }

    async fn sign_up(&self, _data: &SignUpData) -> Result<SignUpResponse> {
        self.next("sign_up", &self.sign_up)
    }

    async fn list_movies(&self, _query: &MovieQuery) -> Result<MoviesPage> {
        self.next("list_movies", &self.movies)
    }

    async fn get_movie(&self, _movie_id: &str) -> Result<MovieDetails> {
        self.next("get_movie", &self.movie)
    }

    async fn list_reviews(&self, _movie_id: &str, _page: u32) -> Result<ReviewsPage> {
        self.next("list_reviews", &self.reviews)
    }

    async fn submit_review(&self, _movie_id: &str, _review: &ReviewSubmission) -> Result<()> {
        self.next("submit_review", &self.submit_review)
    }

    async fn user_reviews(&self) -> Result<Vec<ReviewHistoryEntry>> {
        self.next("user_reviews", &self.user_reviews)
    }

    async fn toggle_watchlist(&self, movie_id: &str) -> Result<ToggleResponse> {
        self.next(&format!("toggle_watchlist:{}", movie_id), &self.toggle)
    }

    async fn watchlist_ids(&self) -> Result<WatchlistIdsResponse> {
        self.next("watchlist_ids", &self.watchlist_ids)
    }

    async fn watchlist(&self) -> Result<WatchlistResponse> {
        self.next("watchlist", &self.watchlist)
    }

    async fn profile(&self) -> Result<UserProfile> {
        self.next("profile", &self.profile)
    }

    async fn update_name(&self, _name: &str) -> Result<UserProfile> {
        self.next("update_name", &self.profile)
    }

    async fn update_email(&self, _email: &str) -> Result<UserProfile> {
        self.next("update_email", &self.profile)
    }

    async fn create_movie(&self, _movie: &NewMovie) -> Result<()> {
        self.next("create_movie", &self.create_movie)
    }
}
