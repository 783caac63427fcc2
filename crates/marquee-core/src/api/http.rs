//! `reqwest` implementation of [`MovieApi`]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::MovieApi;
use crate::auth::TokenStore;
use crate::catalog::MovieQuery;
use crate::error::{Error, Result};
use crate::models::{
    MeResponse, MovieDetails, MovieResponse, MoviesPage, NewMovie, ReviewHistoryEntry,
    ReviewSubmission, ReviewsPage, SignUpData, SignUpResponse, ToggleResponse, UserProfile,
    UserProfileResponse, UserReviewsResponse, WatchlistIdsResponse, WatchlistResponse,
};

/// Longest slice of an error body kept for logging
const MAX_LOGGED_BODY: usize = 500;

/// HTTP client for the movie backend.
///
/// The bearer token is read from the [`TokenStore`] on every request, so a
/// token refreshed by `/api/auth/me` is picked up without rebuilding the
/// client.
pub struct HttpMovieApi {
    base_url: String,
    client: Client,
    tokens: Arc<dyn TokenStore>,
}

impl HttpMovieApi {
    pub fn new(base_url: &str, timeout_secs: u64, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            client,
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.get() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, fallback: &str) -> Result<Response> {
        let response = self.authorized(request).send().await?;
        ensure_success(response, fallback).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, fallback: &str) -> Result<T> {
        log::debug!("[api] GET {}", path);
        let response = self.send(self.client.get(self.url(path)), fallback).await?;
        Ok(response.json().await?)
    }
}

/// Turn a non-2xx response into [`Error::Api`].
///
/// The message comes from the body's `message` field when present,
/// otherwise `fallback` is used.
async fn ensure_success(response: Response, fallback: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    log::warn!(
        "[api] HTTP {}: {}",
        status,
        body.chars().take(MAX_LOGGED_BODY).collect::<String>()
    );
    Err(Error::api(status.as_u16(), extract_message(&body, fallback)))
}

/// Human-readable message from an error body
pub(crate) fn extract_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .and_then(|m| m.as_str())
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(String::from)
        })
        .unwrap_or_else(|| fallback.to_string())
}

/// Percent-encode one path segment so ids cannot escape their slot
fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[async_trait]
impl MovieApi for HttpMovieApi {
    async fn fetch_me(&self) -> Result<MeResponse> {
        self.get_json("/api/auth/me", "Something went wrong").await
    }

    async fn sign_up(&self, data: &SignUpData) -> Result<SignUpResponse> {
        log::debug!("[api] POST /api/auth/signup");
        let body = serde_json::json!({ "signUpData": data });
        let response = self
            .send(
                self.client.post(self.url("/api/auth/signup")).json(&body),
                "Failed to create account",
            )
            .await?;
        Ok(response.json().await?)
    }

    async fn list_movies(&self, query: &MovieQuery) -> Result<MoviesPage> {
        log::debug!("[api] GET /api/movies {:?}", query);
        let request = self
            .client
            .get(self.url("/api/movies"))
            .query(&query.to_request_params());
        let response = self.send(request, "Failed to fetch movies").await?;
        Ok(response.json().await?)
    }

    async fn get_movie(&self, movie_id: &str) -> Result<MovieDetails> {
        let path = format!("/api/movies/{}", encode_segment(movie_id));
        let resp: MovieResponse = self
            .get_json(&path, "Failed to fetch movie details")
            .await?;
        Ok(resp.movies)
    }

    async fn list_reviews(&self, movie_id: &str, page: u32) -> Result<ReviewsPage> {
        let path = format!("/api/movies/{}/reviews", encode_segment(movie_id));
        log::debug!("[api] GET {} page={}", path, page);
        let request = self
            .client
            .get(self.url(&path))
            .query(&[("page", page.max(1).to_string())]);
        let response = self.send(request, "Failed to fetch reviews").await?;
        Ok(response.json().await?)
    }

    async fn submit_review(&self, movie_id: &str, review: &ReviewSubmission) -> Result<()> {
        let path = format!("/api/user/movies/{}/reviews", encode_segment(movie_id));
        log::debug!("[api] POST {}", path);
        let body = serde_json::json!({ "reviewData": review });
        self.send(
            self.client.post(self.url(&path)).json(&body),
            "Failed to submit review",
        )
        .await?;
        Ok(())
    }

    async fn user_reviews(&self) -> Result<Vec<ReviewHistoryEntry>> {
        let resp: UserReviewsResponse = self
            .get_json("/api/user/reviews", "Failed to fetch review history")
            .await?;
        Ok(resp.review.review.unwrap_or_default())
    }

    async fn toggle_watchlist(&self, movie_id: &str) -> Result<ToggleResponse> {
        let path = format!("/api/user/watchlist/toggle/{}", encode_segment(movie_id));
        log::debug!("[api] POST {}", path);
        let response = self
            .send(self.client.post(self.url(&path)), "Failed to toggle watchlist")
            .await?;
        Ok(response.json().await?)
    }

    async fn watchlist_ids(&self) -> Result<WatchlistIdsResponse> {
        self.get_json("/api/user/watchlist/ids", "Failed to fetch watchlist IDs")
            .await
    }

    async fn watchlist(&self) -> Result<WatchlistResponse> {
        self.get_json("/api/user/watchlist", "Failed to fetch watchlist")
            .await
    }

    async fn profile(&self) -> Result<UserProfile> {
        let resp: UserProfileResponse = self
            .get_json("/api/user", "Failed to load user data")
            .await?;
        Ok(resp.user)
    }

    async fn update_name(&self, name: &str) -> Result<UserProfile> {
        log::debug!("[api] PATCH /api/user/name");
        let response = self
            .send(
                self.client
                    .patch(self.url("/api/user/name"))
                    .json(&serde_json::json!({ "name": name })),
                "Failed to update name",
            )
            .await?;
        let resp: UserProfileResponse = response.json().await?;
        Ok(resp.user)
    }

    async fn update_email(&self, email: &str) -> Result<UserProfile> {
        log::debug!("[api] PATCH /api/user/email");
        let response = self
            .send(
                self.client
                    .patch(self.url("/api/user/email"))
                    .json(&serde_json::json!({ "email": email })),
                "Failed to update email",
            )
            .await?;
        let resp: UserProfileResponse = response.json().await?;
        Ok(resp.user)
    }

    async fn create_movie(&self, movie: &NewMovie) -> Result<()> {
        log::debug!("[api] POST /api/admin/movies");
        let body = serde_json::json!({ "movieData": movie });
        self.send(
            self.client.post(self.url("/api/admin/movies")).json(&body),
            "Failed to create movie",
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryTokenStore;

    #[test]
    fn test_extract_message_from_body() {
        let body = r#"{"message": "Movie not found"}"#;
        assert_eq!(extract_message(body, "fallback"), "Movie not found");
    }

    #[test]
    fn test_extract_message_falls_back() {
        assert_eq!(extract_message("", "Failed"), "Failed");
        assert_eq!(extract_message("<html>502</html>", "Failed"), "Failed");
        assert_eq!(extract_message(r#"{"error": "x"}"#, "Failed"), "Failed");
        assert_eq!(extract_message(r#"{"message": "   "}"#, "Failed"), "Failed");
        assert_eq!(extract_message(r#"{"message": 42}"#, "Failed"), "Failed");
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("abc-123"), "abc-123");
        assert_eq!(encode_segment("a/b"), "a%2Fb");
        assert_eq!(encode_segment("a b?"), "a%20b%3F");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = HttpMovieApi::new(
            "http://localhost:8000/",
            5,
            Arc::new(MemoryTokenStore::new()),
        )
        .unwrap();
        assert_eq!(api.base_url(), "http://localhost:8000");
        assert_eq!(api.url("/api/movies"), "http://localhost:8000/api/movies");
    }
}
