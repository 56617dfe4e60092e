//! School (tenant) entity.

pub mod model;

pub use model::School;
