//! Data models for the Marquee client
//!
//! Field names follow the backend's camelCase JSON.

use serde::{Deserialize, Serialize};

use crate::rating::{Rating, StarRating};

// ============================================================================
// Identity
// ============================================================================

/// Role carried by the authenticated identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
    #[default]
    Guest,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Guest => "guest",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            "guest" => Ok(Role::Guest),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// Authenticated identity returned by `/api/auth/me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "uid")]
    pub id: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub is_admin: bool,
}

/// `GET /api/auth/me`
#[derive(Debug, Clone, Deserialize)]
pub struct MeResponse {
    pub token: String,
    pub user: User,
}

/// Body of `POST /api/auth/signup`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpData {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// `POST /api/auth/signup`
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpResponse {
    pub token: String,
}

/// Account details shown on the profile page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub profile_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// `GET /api/user`, `PATCH /api/user/name`, `PATCH /api/user/email`
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfileResponse {
    pub user: UserProfile,
}

// ============================================================================
// Movies
// ============================================================================

/// Movie summary as listed in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub release_year: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub average_rating: Rating,
}

/// Full movie record shown on the details page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetails {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub release_year: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub average_rating: Rating,
    #[serde(default)]
    pub cast: Vec<String>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub backdrop_url: Option<String>,
    #[serde(default)]
    pub trailer_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl MovieDetails {
    /// Runtime as `"2h 5m"`, `"45m"` or `"N/A"`
    pub fn formatted_runtime(&self) -> String {
        format_runtime(self.runtime)
    }
}

/// Minutes rendered as hours and minutes
pub fn format_runtime(runtime: Option<u32>) -> String {
    match runtime {
        None | Some(0) => "N/A".to_string(),
        Some(minutes) => {
            let hours = minutes / 60;
            let rest = minutes % 60;
            if hours > 0 {
                format!("{}h {}m", hours, rest)
            } else {
                format!("{}m", rest)
            }
        }
    }
}

/// `GET /api/movies`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoviesPage {
    #[serde(default)]
    pub movies: Vec<Movie>,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "first_page")]
    pub total_pages: u32,
    #[serde(default)]
    pub total_movies: u64,
}

/// `GET /api/movies/:id`; the backend nests the record under `movies`
#[derive(Debug, Clone, Deserialize)]
pub struct MovieResponse {
    pub movies: MovieDetails,
}

/// Payload of `POST /api/admin/movies`, sent as `{ movieData }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMovie {
    pub title: String,
    pub synopsis: String,
    pub genres: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    pub cast: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailer_url: Option<String>,
}

// ============================================================================
// Reviews
// ============================================================================

/// Author attached to a review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewAuthor {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Review shown under a movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    #[serde(default)]
    pub rating: Rating,
    #[serde(default)]
    pub review_text: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub user: Option<ReviewAuthor>,
}

/// `GET /api/movies/:id/reviews`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsPage {
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "first_page")]
    pub total_pages: u32,
    #[serde(default)]
    pub total_reviews: u64,
}

/// Body of `POST /api/user/movies/:id/reviews`, sent as `{ reviewData }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSubmission {
    pub review_text: String,
    pub rating: StarRating,
}

/// Movie reference inside a review-history entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewedMovie {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

/// One of the signed-in user's own reviews
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewHistoryEntry {
    #[serde(default)]
    pub rating: Rating,
    #[serde(default)]
    pub review_text: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(rename = "Movies", alias = "movie")]
    pub movie: ReviewedMovie,
}

/// `GET /api/user/reviews` nests the list as `{ review: { id, name, review } }`
#[derive(Debug, Clone, Deserialize)]
pub struct UserReviewsResponse {
    pub review: UserReviews,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserReviews {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub review: Option<Vec<ReviewHistoryEntry>>,
}

// ============================================================================
// Watchlist
// ============================================================================

/// Hydrated movie summary held by the watchlist container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistMovie {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub release_year: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub synopsis: Option<String>,
}

/// Watchlist row as returned by the backend: the row id plus the movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub id: String,
    pub movies: WatchlistMovie,
}

/// `POST /api/user/watchlist/toggle/:id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub removed: bool,
}

/// `GET /api/user/watchlist/ids`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistIdsResponse {
    #[serde(default)]
    pub watch_list_ids: Vec<String>,
}

/// `GET /api/user/watchlist`; a `null` list means empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistResponse {
    #[serde(default)]
    pub watch_list: Option<Vec<WatchlistEntry>>,
}

fn first_page() -> u32 {
    1
}
