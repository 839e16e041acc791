//! Integration tests for the authentication flow.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_register_and_me() {
    let app = TestApp::new().await;
    let token = app.register_user("renter@example.com", "password123").await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["email"], "renter@example.com");
    assert!(response.body["data"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new().await;
    app.register_user("dup@example.com", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "email": "DUP@example.com",
                "password": "password456",
                "firstName": "Second",
                "lastName": "User",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "email": "not-an-email",
                "password": "password123",
                "firstName": "A",
                "lastName": "B",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new().await;
    app.register_user("renter@example.com", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "renter@example.com", "password": "wrongpassword" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new().await;
    app.register_user("renter@example.com", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "renter@example.com", "password": "password123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["token"].is_string());
    assert_eq!(response.body["data"]["user"]["firstName"], "Test");
}

#[tokio::test]
async fn test_me_requires_token() {
    let app = TestApp::new().await;

    let missing = app.request("GET", "/api/auth/me", None, None).await;
    let garbage = app
        .request("GET", "/api/auth/me", None, Some("not-a-jwt"))
        .await;

    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_profile() {
    let app = TestApp::new().await;
    let token = app.register_user("renter@example.com", "password123").await;

    let response = app
        .request(
            "PUT",
            "/api/auth/profile",
            Some(json!({ "address": "12 Harbour Rd", "phone": "555-123-4567" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["address"], "12 Harbour Rd");
    assert_eq!(response.body["data"]["firstName"], "Test");

    let profile = app
        .request("GET", "/api/auth/profile", None, Some(&token))
        .await;
    assert_eq!(profile.body["data"]["phone"], "555-123-4567");
}
