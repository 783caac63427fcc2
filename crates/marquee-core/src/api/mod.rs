//! Backend API seam
//!
//! [`MovieApi`] lists every endpoint the client consumes. The state
//! containers only talk to this trait, so tests can swap in a fake and the
//! CLI plugs in [`HttpMovieApi`].
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use marquee_core::api::{HttpMovieApi, MovieApi};
//! use marquee_core::auth::FileTokenStore;
//!
//! let tokens = Arc::new(FileTokenStore::new("/tmp/creds.json"));
//! let api = HttpMovieApi::new("http://localhost:8000", 30, tokens)?;
//! let page = api.list_movies(&Default::default()).await?;
//! ```

#[cfg(test)]
pub(crate) mod fake;
mod http;

pub use http::HttpMovieApi;

use async_trait::async_trait;

use crate::catalog::MovieQuery;
use crate::error::Result;
use crate::models::{
    MeResponse, MovieDetails, MoviesPage, NewMovie, ReviewHistoryEntry, ReviewSubmission,
    ReviewsPage, SignUpData, SignUpResponse, ToggleResponse, UserProfile, WatchlistIdsResponse,
    WatchlistResponse,
};

/// Endpoints of the movie backend
#[async_trait]
pub trait MovieApi: Send + Sync {
    /// `GET /api/auth/me`
    async fn fetch_me(&self) -> Result<MeResponse>;

    /// `POST /api/auth/signup`
    async fn sign_up(&self, data: &SignUpData) -> Result<SignUpResponse>;

    /// `GET /api/movies?{page,search,genre,year,sort,type}`
    async fn list_movies(&self, query: &MovieQuery) -> Result<MoviesPage>;

    /// `GET /api/movies/:id`
    async fn get_movie(&self, movie_id: &str) -> Result<MovieDetails>;

    /// `GET /api/movies/:id/reviews?page`
    async fn list_reviews(&self, movie_id: &str, page: u32) -> Result<ReviewsPage>;

    /// `POST /api/user/movies/:id/reviews`
    async fn submit_review(&self, movie_id: &str, review: &ReviewSubmission) -> Result<()>;

    /// `GET /api/user/reviews`
    async fn user_reviews(&self) -> Result<Vec<ReviewHistoryEntry>>;

    /// `POST /api/user/watchlist/toggle/:id`
    async fn toggle_watchlist(&self, movie_id: &str) -> Result<ToggleResponse>;

    /// `GET /api/user/watchlist/ids`
    async fn watchlist_ids(&self) -> Result<WatchlistIdsResponse>;

    /// `GET /api/user/watchlist`
    async fn watchlist(&self) -> Result<WatchlistResponse>;

    /// `GET /api/user`
    async fn profile(&self) -> Result<UserProfile>;

    /// `PATCH /api/user/name`
    async fn update_name(&self, name: &str) -> Result<UserProfile>;

    /// `PATCH /api/user/email`
    async fn update_email(&self, email: &str) -> Result<UserProfile>;

    /// `POST /api/admin/movies`
    async fn create_movie(&self, movie: &NewMovie) -> Result<()>;
}
