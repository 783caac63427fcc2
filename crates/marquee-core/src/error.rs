//! Unified error handling for marquee-core

use thiserror::Error;

/// Core error type for marquee-core
#[derive(Error, Debug)]
pub enum Error {
    /// Backend answered with a non-2xx status.
    /// The message is the body's `message` field, or the operation's fallback.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for marquee-core
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an API error from a status code and message
    pub fn api(status: u16, msg: impl Into<String>) -> Self {
        Error::Api {
            status,
            message: msg.into(),
        }
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Error::Auth(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }

    /// HTTP status carried by the error, if the backend produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True when the backend rejected the credential (401/403)
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::auth("Invalid token");
        assert_eq!(err.to_string(), "Authentication error: Invalid token");
    }

    #[test]
    fn test_api_error_displays_message_only() {
        let err = Error::api(404, "Movie not found");
        assert_eq!(err.to_string(), "Movie not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_is_unauthorized() {
        assert!(Error::api(401, "Unauthorized").is_unauthorized());
        assert!(Error::api(403, "Forbidden").is_unauthorized());
        assert!(!Error::api(500, "Boom").is_unauthorized());
        assert!(!Error::validation("bad").is_unauthorized());
    }

    #[test]
    fn test_error_conversion_to_string() {
        let err = Error::validation("Invalid input");
        let s: String = err.into();
        assert!(s.contains("Validation error"));
    }
}
