//! LeaseHub Server: rental marketplace backend
//!
//! Main entry point that loads configuration, initializes logging, and
//! starts the HTTP server.

use tracing_subscriber::{EnvFilter, fmt};

use leasehub_core::config::AppConfig;
use leasehub_core::error::AppError;

#[tokio::main]
async fn main() {
    // ── Step 1: Load configuration ───────────────────────────────
    let env = std::env::var("LEASEHUB_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // ── Step 2: Initialize logging ───────────────────────────────
    init_logging(&config);
    tracing::info!(env = %env, "Starting LeaseHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 3: Serve until shutdown ─────────────────────────────
    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        data_dir = %config.notifications.data_dir,
        "Notification data directory"
    );
    leasehub_api::run_server(config).await
}
