//! Common library for the Epic Notes service
//!
//! Shared infrastructure used by the service crates: PostgreSQL pooling and
//! migrations, the Redis key/value pool, and their error types.

pub mod cache;
pub mod database;
pub mod error;

pub use cache::{RedisConfig, RedisPool};
pub use database::{DatabaseConfig, health_check, init_pool, run_migrations};
pub use error::{CacheError, CacheResult, DatabaseError, DatabaseResult};
