//! # jeton-database
//!
//! PostgreSQL connection pool management, migrations, and repository
//! implementations for Jeton. Repositories are thin structs over `PgPool`;
//! each write is a single-row insert or upsert keyed by primary/unique key,
//! and the only multi-row mutations run inside one transaction.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
