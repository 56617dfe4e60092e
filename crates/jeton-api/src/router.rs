//! Route definitions for the Jeton HTTP API.
//!
//! API routes are organized by domain and mounted under `/api`. The edge
//! access gate wraps the whole surface; `/api` is in its excluded prefixes,
//! so API requests authenticate through the `CurrentSession` extractor
//! while page routes get the cookie-presence gate.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(onboarding_routes())
        .merge(access_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::csrf::require_csrf,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::gate::access_gate,
        ))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: register, login, logout, token, refresh, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/token", post(handlers::auth::token_login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/me", get(handlers::auth::me))
}

/// Onboarding flow endpoints
fn onboarding_routes() -> Router<AppState> {
    Router::new()
        .route("/onboarding/status", get(handlers::onboarding::status))
        .route("/onboarding/step", post(handlers::onboarding::submit_step))
        .route("/onboarding/complete", post(handlers::onboarding::complete))
}

/// Access-check endpoints
fn access_routes() -> Router<AppState> {
    Router::new()
        .route("/access/dashboard", get(handlers::access::dashboard))
        .route("/access/plan", get(handlers::access::plan))
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use tower_http::cors::{AllowOrigin, Any};

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<axum::http::HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(AllowOrigin::list(origins));
    }

    cors.max_age(std::time::Duration::from_secs(cors_config.max_age_seconds))
}
