//! # jeton-entity
//!
//! Domain entity models for the Jeton school-management backend: users,
//! schools, sessions, onboarding steps, and access grants. Entities map
//! 1:1 to database rows via `sqlx::FromRow`.

pub mod onboarding;
pub mod school;
pub mod session;
pub mod subscription;
pub mod user;
