//! # jeton-core
//!
//! Core crate for the Jeton school-management backend. Contains configuration
//! schemas, shared response types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Jeton crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
