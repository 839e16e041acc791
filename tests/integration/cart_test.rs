//! Integration tests for carts, quotes, and checkout.

use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::TestApp;

fn camera() -> Value {
    json!({
        "id": "cam-1",
        "name": "Cinema Camera",
        "category": "video",
        "pricePerDay": 100,
        "rentalDays": 3,
        "minRentalDays": 2,
        "deliveryOption": "express",
        "insuranceOption": "premium",
        "availability": "available",
    })
}

fn total(body: &Value) -> f64 {
    body["data"]["totals"]["total"].as_f64().expect("numeric total")
}

#[tokio::test]
async fn test_add_item_prices_cart() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/api/carts/s1/items", Some(camera()), None)
        .await;

    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    let totals = &response.body["data"]["totals"];
    assert_eq!(totals["subtotal"].as_f64(), Some(1400.0));
    assert_eq!(totals["tax"].as_f64(), Some(252.0));
    assert_eq!(total(&response.body), 1652.0);
}

#[tokio::test]
async fn test_readding_item_does_not_duplicate() {
    let app = TestApp::new().await;
    app.request("POST", "/api/carts/s1/items", Some(camera()), None)
        .await;

    let mut again = camera();
    again["rentalDays"] = json!(5);
    let response = app
        .request("POST", "/api/carts/s1/items", Some(again), None)
        .await;

    let items = response.body["data"]["items"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["rentalDays"], 5);
}

#[tokio::test]
async fn test_days_below_minimum_are_clamped() {
    let app = TestApp::new().await;
    app.request("POST", "/api/carts/s1/items", Some(camera()), None)
        .await;

    let response = app
        .request(
            "PUT",
            "/api/carts/s1/items/cam-1/days",
            Some(json!({ "rentalDays": 1 })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["items"][0]["rentalDays"], 2);
}

#[tokio::test]
async fn test_zero_days_clamped_to_minimum() {
    let app = TestApp::new().await;
    let mut drill = camera();
    drill["id"] = json!("drill");
    drill["minRentalDays"] = json!(1);
    app.request("POST", "/api/carts/s1/items", Some(drill), None)
        .await;

    let response = app
        .request(
            "PUT",
            "/api/carts/s1/items/drill/days",
            Some(json!({ "rentalDays": 0 })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.body["data"]["items"][0]["rentalDays"], 1);
}

#[tokio::test]
async fn test_oversized_price_rejected_and_cart_stays_usable() {
    let app = TestApp::new().await;
    app.request("POST", "/api/carts/s1/items", Some(camera()), None)
        .await;

    let mut big = camera();
    big["id"] = json!("big");
    big["pricePerDay"] = json!(1e28);
    big["rentalDays"] = json!(10);
    let response = app
        .request("POST", "/api/carts/s1/items", Some(big.clone()), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST, "{}", response.body);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let cart = app.request("GET", "/api/carts/s1", None, None).await;
    assert_eq!(cart.status, StatusCode::OK);
    assert_eq!(cart.body["data"]["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(total(&cart.body), 1652.0);

    let quote = app
        .request(
            "POST",
            "/api/pricing/quote",
            Some(json!({ "items": [big] })),
            None,
        )
        .await;
    assert_eq!(quote.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_missing_item_is_404() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "PUT",
            "/api/carts/s1/items/ghost/delivery",
            Some(json!({ "deliveryOption": "same-day" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_invalid_option_rejected() {
    let app = TestApp::new().await;
    app.request("POST", "/api/carts/s1/items", Some(camera()), None)
        .await;

    let response = app
        .request(
            "PUT",
            "/api/carts/s1/items/cam-1/insurance",
            Some(json!({ "insuranceOption": "platinum" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_remove_and_clear() {
    let app = TestApp::new().await;
    app.request("POST", "/api/carts/s1/items", Some(camera()), None)
        .await;

    let removed = app
        .request("DELETE", "/api/carts/s1/items/cam-1", None, None)
        .await;
    assert_eq!(removed.body["data"]["items"].as_array().map(Vec::len), Some(0));
    assert_eq!(total(&removed.body), 0.0);

    app.request("POST", "/api/carts/s1/items", Some(camera()), None)
        .await;
    app.request("DELETE", "/api/carts/s1", None, None).await;
    let cart = app.request("GET", "/api/carts/s1", None, None).await;
    assert_eq!(cart.body["data"]["items"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_quote_matches_cart() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/pricing/quote",
            Some(json!({ "items": [camera()] })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["total"].as_f64(), Some(1652.0));
}

#[tokio::test]
async fn test_checkout_confirms_and_empties_cart() {
    let app = TestApp::new().await;
    app.request("POST", "/api/carts/s1/items", Some(camera()), None)
        .await;

    let response = app
        .request(
            "POST",
            "/api/carts/s1/checkout",
            Some(json!({ "email": "renter@example.com" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert!(response.body["data"]["orderId"].is_string());
    assert_eq!(total(&response.body), 1652.0);
    assert_eq!(
        response.body["data"]["notification"]["sentChannels"],
        json!(["Email"])
    );

    let cart = app.request("GET", "/api/carts/s1", None, None).await;
    assert_eq!(cart.body["data"]["items"].as_array().map(Vec::len), Some(0));

    let history = app
        .request(
            "GET",
            "/api/notifications/history?type=orderConfirmation&event=notification_sent",
            None,
            None,
        )
        .await;
    let events = history.body["data"]["history"].as_array().expect("history");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["recipient"], "renter@example.com");
}

#[tokio::test]
async fn test_checkout_empty_cart_is_400() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/api/carts/nobody/checkout", Some(json!({})), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
