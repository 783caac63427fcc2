//! Integration tests for marquee-cli
//!
//! These tests never reach a backend: they cover help output, local
//! configuration, validation and route gating that fail before any request.
//! Tests run serially because they share environment variables.

use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;
use tempfile::TempDir;

/// Get a Command for the marquee binary with an isolated credential file
fn marquee(creds: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("marquee").unwrap();
    cmd.env_remove("MARQUEE_API_URL")
        .env_remove("MARQUEE_TIMEOUT_SECS")
        .env_remove("MARQUEE_TOKEN")
        .env("MARQUEE_TOKEN_PATH", creds.path().join("credentials.json"))
        .env("NO_COLOR", "1");
    cmd
}

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
#[serial]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    marquee(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("marquee"))
        .stdout(predicate::str::contains("watchlist"));
}

#[test]
#[serial]
fn test_cli_version() {
    let dir = TempDir::new().unwrap();
    marquee(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("marquee"));
}

#[test]
#[serial]
fn test_subcommand_help() {
    let dir = TempDir::new().unwrap();
    for (cmd, expected) in [
        ("auth", "login"),
        ("movies", "list"),
        ("reviews", "history"),
        ("watchlist", "toggle"),
        ("profile", "set-email"),
        ("admin", "add-movie"),
        ("config", "show"),
    ] {
        marquee(&dir)
            .args([cmd, "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains(expected));
    }
}

// =============================================================================
// Config Tests
// =============================================================================

#[test]
#[serial]
fn test_config_show_defaults() {
    let dir = TempDir::new().unwrap();
    marquee(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MARQUEE_API_URL"))
        .stdout(predicate::str::contains("http://localhost:8000"))
        .stdout(predicate::str::contains("default"));
}

#[test]
#[serial]
fn test_config_show_env_and_flag() {
    let dir = TempDir::new().unwrap();
    marquee(&dir)
        .env("MARQUEE_API_URL", "https://movies.example.com/")
        .args(["config", "show", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://movies.example.com"))
        .stdout(predicate::str::contains("\"env\""));

    marquee(&dir)
        .env("MARQUEE_API_URL", "https://movies.example.com")
        .args(["--api-url", "http://127.0.0.1:9000", "config", "get", "MARQUEE_API_URL"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://127.0.0.1:9000"));
}

#[test]
#[serial]
fn test_invalid_api_url_rejected() {
    let dir = TempDir::new().unwrap();
    marquee(&dir)
        .args(["--api-url", "movies.example.com", "config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("http://"));
}

// =============================================================================
// Session Tests
// =============================================================================

#[test]
#[serial]
fn test_guest_cannot_open_watchlist() {
    let dir = TempDir::new().unwrap();
    marquee(&dir)
        .args(["watchlist", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not signed in"));
}

#[test]
#[serial]
fn test_guest_routes() {
    let dir = TempDir::new().unwrap();
    marquee(&dir)
        .args(["auth", "routes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/signup"))
        .stdout(predicate::str::contains("/signin"))
        .stdout(predicate::str::contains("/account").not());
}

#[test]
#[serial]
fn test_logout_clears_credential() {
    let dir = TempDir::new().unwrap();
    let creds = dir.path().join("credentials.json");
    std::fs::write(&creds, r#"{"authToken": "abc", "theme": "dark"}"#).unwrap();

    marquee(&dir)
        .args(["auth", "logout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed out"));

    let contents = std::fs::read_to_string(&creds).unwrap();
    assert!(!contents.contains("authToken"));
    assert!(contents.contains("theme"));
}

#[test]
#[serial]
fn test_whoami_without_token() {
    let dir = TempDir::new().unwrap();
    marquee(&dir)
        .args(["auth", "whoami"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not signed in"));
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test]
#[serial]
fn test_signup_validation_reports_fields() {
    let dir = TempDir::new().unwrap();
    marquee(&dir)
        .args([
            "auth",
            "signup",
            "--name",
            "A",
            "--email",
            "not-an-email",
            "--password",
            "123",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Name must be at least 2 characters"))
        .stderr(predicate::str::contains("Please enter a valid email"));
}

#[test]
#[serial]
fn test_blank_review_rejected() {
    let dir = TempDir::new().unwrap();
    marquee(&dir)
        .args(["reviews", "add", "m1", "--rating", "four", "--text", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Review text must not be empty"));
}

#[test]
#[serial]
fn test_bad_rating_rejected_by_parser() {
    let dir = TempDir::new().unwrap();
    marquee(&dir)
        .args(["reviews", "add", "m1", "--rating", "seven", "--text", "ok"])
        .assert()
        .failure();
}

#[test]
#[serial]
fn test_profile_email_validation() {
    let dir = TempDir::new().unwrap();
    marquee(&dir)
        .args(["profile", "set-email", "nobody@nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("valid email"));
}

#[test]
#[serial]
fn test_add_movie_dry_run() {
    let dir = TempDir::new().unwrap();
    marquee(&dir)
        .args([
            "admin",
            "add-movie",
            "--title",
            " Heat ",
            "--synopsis",
            "A heist in LA.",
            "--genre",
            "crime",
            "--genre",
            "Crime",
            "--runtime",
            "170",
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("movieData"))
        .stdout(predicate::str::contains("\"title\": \"Heat\""))
        .stdout(predicate::str::contains("\"runtime\": 170"))
        .stdout(predicate::str::contains("posterUrl").not());
}

#[test]
#[serial]
fn test_movies_filters() {
    let dir = TempDir::new().unwrap();
    marquee(&dir)
        .args(["movies", "filters"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Science Fiction"))
        .stdout(predicate::str::contains("Highest Rated"));
}
