//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use leasehub_auth::JwtDecoder;
use leasehub_core::config::AppConfig;
use leasehub_service::cart::CartService;
use leasehub_service::notification::{
    NotificationDispatcher, NotificationSettingsStore, StaffInbox,
};
use leasehub_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Process start, for uptime reporting
    pub started_at: Instant,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Accounts and profiles
    pub user_service: Arc<UserService>,
    /// Cart sessions and checkout
    pub cart_service: Arc<CartService>,
    /// Persisted notification settings and history reads
    pub settings_store: Arc<NotificationSettingsStore>,
    /// Channel routing for test and production sends
    pub dispatcher: Arc<NotificationDispatcher>,
    /// Staff notifications received by this process
    pub staff_inbox: Arc<StaffInbox>,
}
