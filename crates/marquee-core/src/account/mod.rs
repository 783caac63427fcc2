//! Form models for the account pages and the admin catalog editor
//!
//! Validators return the cleaned value on success so callers never send
//! untrimmed input.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::{NewMovie, SignUpData};

pub const MIN_NAME_LEN: usize = 2;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_PASSWORD_LEN: usize = 30;
/// Passwords at least this long count as strong
pub const STRONG_PASSWORD_LEN: usize = 12;

// ============================================================================
// Profile fields
// ============================================================================

/// Trimmed display name, at least [`MIN_NAME_LEN`] characters
pub fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::validation("Name is required"));
    }
    if trimmed.chars().count() < MIN_NAME_LEN {
        return Err(Error::validation(format!(
            "Name must be at least {} characters",
            MIN_NAME_LEN
        )));
    }
    Ok(trimmed.to_string())
}

/// Trimmed email of the form `local@domain.tld`
pub fn validate_email(email: &str) -> Result<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(Error::validation("Email is required"));
    }
    if !looks_like_email(trimmed) {
        return Err(Error::validation("Please enter a valid email address"));
    }
    Ok(trimmed.to_string())
}

/// One `@`, no whitespace, and a dot inside the domain with text on both
/// sides of it
fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

// ============================================================================
// Sign-up
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

impl PasswordStrength {
    pub fn label(&self) -> &'static str {
        match self {
            PasswordStrength::Weak => "Weak password",
            PasswordStrength::Medium => "Medium strength",
            PasswordStrength::Strong => "Strong password",
        }
    }
}

pub fn password_strength(password: &str) -> PasswordStrength {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        PasswordStrength::Weak
    } else if len < STRONG_PASSWORD_LEN {
        PasswordStrength::Medium
    } else {
        PasswordStrength::Strong
    }
}

/// Per-field validation messages, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(pub BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl From<FieldErrors> for Error {
    fn from(errors: FieldErrors) -> Self {
        Error::Validation(errors.to_string())
    }
}

/// Raw sign-up form input
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    /// Check every field and build the request body.
    ///
    /// All failing fields are reported together.
    pub fn validate(&self) -> std::result::Result<SignUpData, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = validate_name(&self.name)
            .map_err(|e| errors.insert("name", validation_message(e)))
            .ok();

        let email = if self.email.trim().is_empty() {
            errors.insert("email", "Email is required");
            None
        } else if !looks_like_email(self.email.trim()) {
            errors.insert("email", "Please enter a valid email");
            None
        } else {
            Some(self.email.trim().to_string())
        };

        let len = self.password.chars().count();
        if self.password.is_empty() {
            errors.insert("password", "Password is required");
        } else if len < MIN_PASSWORD_LEN {
            errors.insert(
                "password",
                format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
            );
        } else if len > MAX_PASSWORD_LEN {
            errors.insert(
                "password",
                format!("Password must be no more than {} characters", MAX_PASSWORD_LEN),
            );
        }

        if self.confirm_password.is_empty() {
            errors.insert("confirmPassword", "Please confirm your password");
        } else if self.confirm_password != self.password {
            errors.insert("confirmPassword", "Passwords do not match");
        }

        match (name, email) {
            (Some(name), Some(email)) if errors.is_empty() => Ok(SignUpData {
                email,
                name,
                password: self.password.clone(),
            }),
            _ => Err(errors),
        }
    }
}

fn validation_message(error: Error) -> String {
    match error {
        Error::Validation(msg) => msg,
        other => other.to_string(),
    }
}

// ============================================================================
// Admin: add movie
// ============================================================================

/// Raw "add movie" form; everything is text until [`NewMovieForm::to_payload`]
#[derive(Debug, Clone, Default)]
pub struct NewMovieForm {
    pub title: String,
    pub synopsis: String,
    pub genres: Vec<String>,
    pub release_year: String,
    pub runtime: String,
    pub language: String,
    pub country: String,
    pub director: String,
    pub cast: Vec<String>,
    pub poster_url: String,
    pub backdrop_url: String,
    pub trailer_url: String,
}

impl NewMovieForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a trimmed genre unless blank or already present.
    /// Returns whether the list changed.
    pub fn add_genre(&mut self, genre: &str) -> bool {
        push_unique(&mut self.genres, genre)
    }

    pub fn remove_genre(&mut self, genre: &str) {
        self.genres.retain(|g| g != genre);
    }

    pub fn add_cast_member(&mut self, name: &str) -> bool {
        push_unique(&mut self.cast, name)
    }

    pub fn remove_cast_member(&mut self, name: &str) {
        self.cast.retain(|c| c != name);
    }

    /// Build the request body.
    ///
    /// Title and synopsis are required. Empty optional fields are left out.
    /// Runtime takes the leading digits of the input, like the browser form.
    pub fn to_payload(&self) -> Result<NewMovie> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(Error::validation("Title is required"));
        }
        let synopsis = self.synopsis.trim();
        if synopsis.is_empty() {
            return Err(Error::validation("Synopsis is required"));
        }

        Ok(NewMovie {
            title: title.to_string(),
            synopsis: synopsis.to_string(),
            genres: self.genres.clone(),
            release_year: non_empty(&self.release_year),
            runtime: parse_runtime(&self.runtime),
            language: non_empty(&self.language),
            country: non_empty(&self.country),
            director: non_empty(&self.director),
            cast: self.cast.clone(),
            poster_url: non_empty(&self.poster_url),
            backdrop_url: non_empty(&self.backdrop_url),
            trailer_url: non_empty(&self.trailer_url),
        })
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() || list.iter().any(|v| v == value) {
        return false;
    }
    list.push(value.to_string());
    true
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Leading integer of `input`; `None` when there is none or it is zero
pub fn parse_runtime(input: &str) -> Option<u32> {
    let digits: String = input
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse::<u32>().ok().filter(|m| *m > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  Ann ").unwrap(), "Ann");
        assert!(matches!(validate_name("   "), Err(Error::Validation(m)) if m == "Name is required"));
        assert!(validate_name(" A ").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert_eq!(validate_email(" a@b.co ").unwrap(), "a@b.co");
        assert!(validate_email("").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("a@@b.co").is_err());
        assert!(validate_email("a b@c.de").is_err());
        assert!(validate_email("@b.co").is_err());
        assert!(validate_email("a@.co").is_err());
        assert!(validate_email("a@b.").is_err());
        assert!(validate_email("first.last@mail.example.org").is_ok());
    }

    #[test]
    fn test_password_strength() {
        assert_eq!(password_strength("abc"), PasswordStrength::Weak);
        assert_eq!(password_strength("abcdef"), PasswordStrength::Medium);
        assert_eq!(password_strength("abcdefghijkl"), PasswordStrength::Strong);
    }

    #[test]
    fn test_sign_up_form_valid() {
        let form = SignUpForm {
            name: " Ann Lee ".to_string(),
            email: "ann@example.com".to_string(),
            password: "hunter22".to_string(),
            confirm_password: "hunter22".to_string(),
        };
        let data = form.validate().unwrap();
        assert_eq!(data.name, "Ann Lee");
        assert_eq!(data.email, "ann@example.com");
        assert_eq!(data.password, "hunter22");
    }

    #[test]
    fn test_sign_up_form_reports_every_field() {
        let form = SignUpForm {
            name: "A".to_string(),
            email: "nope".to_string(),
            password: "123".to_string(),
            confirm_password: "1234".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Name must be at least 2 characters"));
        assert_eq!(errors.get("email"), Some("Please enter a valid email"));
        assert_eq!(errors.get("password"), Some("Password must be at least 6 characters"));
        assert_eq!(errors.get("confirmPassword"), Some("Passwords do not match"));

        let err: Error = errors.into();
        assert!(err.to_string().contains("confirmPassword: Passwords do not match"));
    }

    #[test]
    fn test_sign_up_password_too_long() {
        let long = "x".repeat(31);
        let form = SignUpForm {
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            password: long.clone(),
            confirm_password: long,
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("password"), Some("Password must be no more than 30 characters"));
    }

    #[test]
    fn test_movie_form_dedups_lists() {
        let mut form = NewMovieForm::new();
        assert!(form.add_genre(" Drama "));
        assert!(!form.add_genre("Drama"));
        assert!(!form.add_genre("   "));
        assert!(form.add_cast_member("Al Pacino"));
        assert!(!form.add_cast_member("Al Pacino "));
        assert_eq!(form.genres, vec!["Drama"]);
        assert_eq!(form.cast, vec!["Al Pacino"]);

        form.remove_genre("Drama");
        form.remove_cast_member("Al Pacino");
        assert!(form.genres.is_empty());
        assert!(form.cast.is_empty());
    }

    #[test]
    fn test_movie_form_payload() {
        let mut form = NewMovieForm::new();
        form.title = " Heat ".to_string();
        form.synopsis = "A heist.".to_string();
        form.runtime = "170 min".to_string();
        form.director = "  ".to_string();
        form.release_year = "1995".to_string();
        form.add_genre("Crime");

        let movie = form.to_payload().unwrap();
        assert_eq!(movie.title, "Heat");
        assert_eq!(movie.runtime, Some(170));
        assert_eq!(movie.director, None);
        assert_eq!(movie.release_year.as_deref(), Some("1995"));
        assert_eq!(movie.genres, vec!["Crime"]);
    }

    #[test]
    fn test_movie_form_requires_title_and_synopsis() {
        let mut form = NewMovieForm::new();
        form.synopsis = "x".to_string();
        assert!(matches!(form.to_payload(), Err(Error::Validation(_))));

        form.title = "Heat".to_string();
        form.synopsis = String::new();
        assert!(matches!(form.to_payload(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_parse_runtime() {
        assert_eq!(parse_runtime("125"), Some(125));
        assert_eq!(parse_runtime(" 90m"), Some(90));
        assert_eq!(parse_runtime("abc"), None);
        assert_eq!(parse_runtime("0"), None);
        assert_eq!(parse_runtime(""), None);
    }
}
