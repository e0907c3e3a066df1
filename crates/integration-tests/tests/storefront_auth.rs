//! Integration tests for storefront authentication.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The storefront running (cargo run -p hemline-storefront)
//!
//! Run with: cargo test -p hemline-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the storefront API (configurable via environment).
fn base_url() -> String {
    std::env::var("HEMLINE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

fn fresh_email() -> String {
    format!("auth-test-{}@example.com", Uuid::new_v4())
}

// ============================================================================
// Registration & Login Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_register_login_me_roundtrip() {
    let client = client();
    let base_url = base_url();
    let email = fresh_email();
    let credentials = json!({"email": email, "password": "correct-horse-battery"});

    let resp = client
        .post(format!("{base_url}/auth/register"))
        .json(&credentials)
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Registration establishes a session
    let resp = client
        .get(format!("{base_url}/auth/me"))
        .send()
        .await
        .expect("Failed to get current user");
    assert_eq!(resp.status(), StatusCode::OK);
    let me: Value = resp.json().await.expect("Failed to read user");
    assert_eq!(me["email"], email);

    // Logout, then log back in with the same credentials
    let resp = client
        .post(format!("{base_url}/auth/logout"))
        .send()
        .await
        .expect("Failed to logout");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .get(format!("{base_url}/auth/me"))
        .send()
        .await
        .expect("Failed to get current user");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = client
        .post(format!("{base_url}/auth/login"))
        .json(&credentials)
        .send()
        .await
        .expect("Failed to login");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/auth/me"))
        .send()
        .await
        .expect("Failed to get current user");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_mixed_case_email_logs_in() {
    let client = client();
    let base_url = base_url();
    let tag = Uuid::new_v4();
    let registered = format!("Mixed-Case-{tag}@Example.COM");
    let canonical = registered.to_lowercase();

    let resp = client
        .post(format!("{base_url}/auth/register"))
        .json(&json!({"email": registered, "password": "correct-horse-battery"}))
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::CREATED);

    // The byte-identical credentials must work...
    let resp = client
        .post(format!("{base_url}/auth/login"))
        .json(&json!({"email": registered, "password": "correct-horse-battery"}))
        .send()
        .await
        .expect("Failed to login");
    assert_eq!(resp.status(), StatusCode::OK);

    // ...and so must the lowercase form, which is what gets stored
    let resp = client
        .post(format!("{base_url}/auth/login"))
        .json(&json!({"email": canonical, "password": "correct-horse-battery"}))
        .send()
        .await
        .expect("Failed to login");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/auth/me"))
        .send()
        .await
        .expect("Failed to get current user");
    let me: Value = resp.json().await.expect("Failed to read user");
    assert_eq!(me["email"], canonical);
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_duplicate_registration_conflicts() {
    let client = client();
    let base_url = base_url();
    let credentials = json!({"email": fresh_email(), "password": "correct-horse-battery"});

    let resp = client
        .post(format!("{base_url}/auth/register"))
        .json(&credentials)
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .post(format!("{base_url}/auth/register"))
        .json(&credentials)
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_wrong_password_rejected() {
    let client = client();
    let base_url = base_url();
    let email = fresh_email();

    let resp = client
        .post(format!("{base_url}/auth/register"))
        .json(&json!({"email": email, "password": "correct-horse-battery"}))
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .post(format!("{base_url}/auth/login"))
        .json(&json!({"email": email, "password": "wrong-password"}))
        .send()
        .await
        .expect("Failed to login");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_short_password_rejected() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .post(format!("{base_url}/auth/register"))
        .json(&json!({"email": fresh_email(), "password": "short"}))
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
