//! Route definitions for the LeaseHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(cart_routes())
        .merge(pricing_routes())
        .merge(notification_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Liveness probe
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Auth endpoints: register, login, logout, me, profile
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
        .route(
            "/auth/profile",
            get(handlers::auth::me).put(handlers::auth::update_profile),
        )
}

/// Cart sessions, line item configuration, checkout
fn cart_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/carts/{cart_id}",
            get(handlers::cart::get_cart).delete(handlers::cart::clear_cart),
        )
        .route("/carts/{cart_id}/items", post(handlers::cart::add_item))
        .route(
            "/carts/{cart_id}/items/{item_id}",
            axum::routing::delete(handlers::cart::remove_item),
        )
        .route(
            "/carts/{cart_id}/items/{item_id}/days",
            put(handlers::cart::set_rental_days),
        )
        .route(
            "/carts/{cart_id}/items/{item_id}/delivery",
            put(handlers::cart::set_delivery_option),
        )
        .route(
            "/carts/{cart_id}/items/{item_id}/insurance",
            put(handlers::cart::set_insurance_option),
        )
        .route("/carts/{cart_id}/checkout", post(handlers::cart::checkout))
}

/// Ad-hoc quotes
fn pricing_routes() -> Router<AppState> {
    Router::new().route("/pricing/quote", post(handlers::pricing::quote))
}

/// Notification settings, dispatch, history, staff inbox
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications/settings",
            get(handlers::notification::get_settings).post(handlers::notification::save_settings),
        )
        .route("/notifications/test", post(handlers::notification::send_test))
        .route("/notifications/send", post(handlers::notification::send))
        .route("/notifications/history", get(handlers::notification::history))
        .route(
            "/notifications/internal",
            get(handlers::notification::list_internal),
        )
        .route(
            "/notifications/internal/unread-count",
            get(handlers::notification::unread_count),
        )
        .route(
            "/notifications/internal/{id}/read",
            put(handlers::notification::mark_read),
        )
}
