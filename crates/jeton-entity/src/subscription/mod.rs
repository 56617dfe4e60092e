//! Trial and subscription grant entities.

pub mod model;

pub use model::{AccessGrant, AccessStatus, GrantType};
