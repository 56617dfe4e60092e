//! Onboarding completion and trial/subscription access policy.

pub mod engine;

pub use engine::{DashboardAccess, DenyReason, PolicyEngine};
