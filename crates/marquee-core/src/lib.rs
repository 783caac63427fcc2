//! # marquee-core
//!
//! Client-side core of Marquee, a movie catalog with reviews and per-user
//! watchlists. The backend is an external REST API.
//!
//! This crate provides:
//! - Reducer-driven state containers (`store`, `auth`, `watchlist` modules)
//! - The backend client seam and its HTTP implementation (`api` module)
//! - Rating normalization (`rating` module)
//! - Role-based route tables (`routes` module)
//! - Catalog filters, review history and form models (`catalog`, `reviews`,
//!   `account` modules)
//! - Client configuration and unified error handling (`config`, `error`)

pub mod account;
pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod rating;
pub mod reviews;
pub mod routes;
pub mod store;
pub mod watchlist;

// Re-exports for convenience
pub use api::{HttpMovieApi, MovieApi};
pub use auth::{AuthState, AuthStatus, AuthStore, FileTokenStore, MemoryTokenStore, TokenStore};
pub use catalog::{MovieQuery, MovieType, SortOrder};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use rating::{color_band, format_rating, to_number, ColorBand, Rating, StarRating};
pub use routes::{Page, RouteTable};
pub use store::{Reducer, Store};
pub use watchlist::{WatchlistState, WatchlistStore};

// Re-export commonly used types from models
pub use models::{
    Movie, MovieDetails, MoviesPage, NewMovie, Review, ReviewHistoryEntry, ReviewSubmission,
    Role, User, UserProfile, WatchlistMovie,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
pub fn version() -> &'static str {
    VERSION
}
