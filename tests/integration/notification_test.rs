//! Integration tests for notification settings, dispatch, history, and the
//! staff inbox.

use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::TestApp;

fn settings_with(overdue_channels: Value) -> Value {
    json!({
        "returnReminders": { "enabled": false, "leadTime": 3, "channels": ["email"] },
        "paymentReminders": { "enabled": false, "leadTime": 7, "channels": ["email"] },
        "overdueAlerts": { "enabled": true, "leadTime": 1, "channels": overdue_channels },
        "pickupReminders": { "enabled": false, "leadTime": 1, "channels": ["sms"] },
        "orderConfirmation": { "enabled": true, "channels": ["email"] },
    })
}

#[tokio::test]
async fn test_first_read_seeds_defaults() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/notifications/settings", None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let settings = &response.body["data"]["settings"];
    assert_eq!(settings["returnReminders"]["leadTime"], 3);
    assert_eq!(settings["overdueAlerts"]["channels"], json!(["email", "sms", "internal"]));
    assert!(settings["orderConfirmation"].get("leadTime").is_none());
    assert!(
        app.config.notifications.settings_path().exists(),
        "settings file should be written on first read"
    );
}

#[tokio::test]
async fn test_save_then_read_back() {
    let app = TestApp::new().await;
    let settings = settings_with(json!(["internal"]));

    let saved = app
        .request(
            "POST",
            "/api/notifications/settings",
            Some(json!({ "settings": settings })),
            None,
        )
        .await;
    assert_eq!(saved.status, StatusCode::OK, "{}", saved.body);

    let read = app
        .request("GET", "/api/notifications/settings", None, None)
        .await;
    assert_eq!(read.body["data"]["settings"]["returnReminders"]["enabled"], false);
    assert_eq!(
        read.body["data"]["settings"]["overdueAlerts"]["channels"],
        json!(["internal"])
    );

    let history = app
        .request(
            "GET",
            "/api/notifications/history?event=settings_updated",
            None,
            None,
        )
        .await;
    let events = history.body["data"]["history"].as_array().expect("history");
    assert_eq!(events[0]["action"], "settings_saved");
}

#[tokio::test]
async fn test_save_without_settings_is_400() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/api/notifications/settings", Some(json!({})), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_email_only_test_dispatch() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/notifications/test",
            Some(json!({
                "type": "customer",
                "notificationType": "returnReminders",
                "settings": {
                    "returnReminders": { "enabled": true, "leadTime": 3, "channels": ["email", "sms"] },
                },
                "testEmail": "qa@example.com",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.body["data"]["sentChannels"], json!(["Email"]));
    assert!(response.body["data"].get("errors").is_none());
}

#[tokio::test]
async fn test_nothing_sent_is_400() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/notifications/test",
            Some(json!({
                "type": "customer",
                "settings": settings_with(json!(["email", "sms"])),
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["message"],
        "No notifications were sent. Please check your settings and test credentials."
    );
}

#[tokio::test]
async fn test_invalid_test_phone_reported_per_channel() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/notifications/test",
            Some(json!({
                "type": "internal",
                "settings": settings_with(json!(["sms", "internal"])),
                "testPhone": "12345",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.body["data"]["sentChannels"], json!(["Internal"]));
    let errors = response.body["data"]["errors"].as_array().expect("errors");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].as_str().is_some_and(|e| e.starts_with("sms: ")));
}

#[tokio::test]
async fn test_unknown_notification_type_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/notifications/send",
            Some(json!({
                "notificationType": "birthdayGreetings",
                "data": { "orderId": "ORD-1" },
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_production_overdue_alert_reaches_inbox() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/notifications/send",
            Some(json!({
                "notificationType": "overdueAlerts",
                "data": {
                    "orderId": "ORD-42",
                    "customerEmail": "late@example.com",
                    "customerPhone": "(555) 123-4567",
                },
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(
        response.body["data"]["sentChannels"],
        json!(["Email", "SMS", "Internal"])
    );

    let unread = app
        .request("GET", "/api/notifications/internal/unread-count", None, None)
        .await;
    assert_eq!(unread.body["data"]["count"], 1);

    let inbox = app
        .request(
            "GET",
            "/api/notifications/internal?category=urgent",
            None,
            None,
        )
        .await;
    let notifications = inbox.body["data"]["notifications"]
        .as_array()
        .expect("notifications");
    assert_eq!(notifications.len(), 1);
    let id = notifications[0]["id"].as_str().expect("id").to_string();

    let read = app
        .request(
            "PUT",
            &format!("/api/notifications/internal/{id}/read"),
            None,
            None,
        )
        .await;
    assert_eq!(read.status, StatusCode::OK);
    assert_eq!(read.body["data"]["read"], true);

    let missing = app
        .request("PUT", "/api/notifications/internal/nope/read", None, None)
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let sms_history = app
        .request(
            "GET",
            "/api/notifications/history?type=overdueAlerts&channel=sms",
            None,
            None,
        )
        .await;
    let events = sms_history.body["data"]["history"]
        .as_array()
        .expect("history");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["type"], "notification_sent");
}

#[tokio::test]
async fn test_history_rejects_unknown_channel() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/notifications/history?channel=pigeon", None, None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_history_with_huge_window_returns_everything() {
    let app = TestApp::new().await;
    app.request("GET", "/api/notifications/settings", None, None)
        .await;

    let response = app
        .request(
            "GET",
            "/api/notifications/history?days=200000000000",
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    let events = response.body["data"]["history"]
        .as_array()
        .expect("history");
    assert!(
        events
            .iter()
            .any(|event| event["type"] == "settings_updated")
    );
}
