//! Application builder. Wires services into state and state into an Axum app.

use std::sync::Arc;
use std::time::Instant;

use axum::Router;

use leasehub_auth::{JwtDecoder, JwtEncoder, PasswordHasher, PasswordValidator};
use leasehub_core::config::AppConfig;
use leasehub_core::error::{AppError, ErrorKind};
use leasehub_service::cart::CartService;
use leasehub_service::notification::{
    EmailSender, HistoryLog, InternalSender, MockBroadcastProvider, MockEmailProvider,
    MockSmsProvider, NotificationDispatcher, NotificationSettingsStore, SmsSender, StaffInbox,
};
use leasehub_service::user::UserService;

use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(build_compression_layer())
        .layer(cors)
}

/// Constructs every store, sender, and service from configuration.
pub async fn build_state(config: AppConfig) -> Result<AppState, AppError> {
    let config = Arc::new(config);
    let notifications = &config.notifications;

    // ── Step 1: Create data directory ────────────────────────────
    tokio::fs::create_dir_all(&notifications.data_dir)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create data dir '{}'", notifications.data_dir),
                e,
            )
        })?;

    // ── Step 2: Notification persistence ─────────────────────────
    let history = Arc::new(HistoryLog::new(notifications));
    let settings_store = Arc::new(NotificationSettingsStore::new(
        notifications,
        Arc::clone(&history),
    ));

    // ── Step 3: Channel senders ──────────────────────────────────
    tracing::info!("Using mock email, SMS, and broadcast providers");
    let staff_inbox = Arc::new(StaffInbox::new(notifications.internal.inbox_capacity));
    let email = EmailSender::new(
        &notifications.email,
        Arc::new(MockEmailProvider::new(&notifications.email)),
        Arc::clone(&history),
    );
    let sms = SmsSender::new(
        &notifications.sms,
        Arc::new(MockSmsProvider::new(&notifications.sms)),
        Arc::clone(&history),
    );
    let internal = InternalSender::new(
        &notifications.internal,
        Arc::new(MockBroadcastProvider::new()),
        Arc::clone(&history),
        Arc::clone(&staff_inbox),
    );
    let dispatcher = Arc::new(NotificationDispatcher::new(
        Arc::clone(&settings_store),
        email,
        sms,
        internal,
    ));

    // ── Step 4: Auth and services ────────────────────────────────
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
    let user_service = Arc::new(UserService::new(
        Arc::new(PasswordHasher::new()),
        Arc::new(PasswordValidator::new(&config.auth)),
        Arc::new(JwtEncoder::new(&config.auth)),
    ));
    let cart_service = Arc::new(CartService::new(Arc::clone(&dispatcher)));

    Ok(AppState {
        config,
        started_at: Instant::now(),
        jwt_decoder,
        user_service,
        cart_service,
        settings_store,
        dispatcher,
        staff_inbox,
    })
}

/// Runs the LeaseHub server until Ctrl+C or SIGTERM.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = build_state(config).await?;
    // Seeds the settings file on first start.
    let settings = state.settings_store.get_settings().await;
    tracing::info!(types = settings.keys().len(), "Notification settings loaded");

    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("LeaseHub server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
