//! Jeton Server — school-management platform backend
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use jeton_api::AppState;
use jeton_auth::session::SessionSweeper;
use jeton_core::config::AppConfig;
use jeton_core::error::AppError;
use jeton_database::DatabasePool;

#[tokio::main]
async fn main() {
    let env = std::env::var("JETON_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Jeton v{}", env!("CARGO_PKG_VERSION"));

    // ── Database: lazy global pool + migrations ──────────────────
    let db = DatabasePool::global(&config.database).await?;

    jeton_database::migration::run_migrations(db.pool()).await?;

    // ── Application state ────────────────────────────────────────
    let state = AppState::initialize(config.clone(), db.pool().clone());

    // ── Background sweeper for expired sessions ──────────────────
    let sweeper = SessionSweeper::new(Arc::clone(&state.session_store), &config.session);
    let sweeper_task = tokio::spawn(sweeper.run());

    // ── HTTP server ──────────────────────────────────────────────
    let app = jeton_api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(addr = %addr, "Jeton server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Graceful teardown ────────────────────────────────────────
    sweeper_task.abort();
    db.close().await;
    tracing::info!("Shutdown complete");

    Ok(())
}

/// Resolves when the process receives ctrl-c or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
