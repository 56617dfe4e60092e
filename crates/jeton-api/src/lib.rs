//! # jeton-api
//!
//! HTTP API layer for Jeton built on Axum.
//!
//! Provides the REST endpoints, edge middleware (access gate, CSRF,
//! request logging), extractors, cookie management, DTOs, and error
//! mapping.

pub mod cookies;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
