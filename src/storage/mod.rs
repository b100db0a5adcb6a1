//! Storage backend implementations
//!
//! The in-memory store is the default feature and doubles as the fake
//! store for tests; PostgreSQL is available behind the `postgres` feature.

pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use in_memory::{InMemoryStore, StaticAuthenticator};
#[cfg(feature = "postgres")]
pub use postgres::PostgresStore;
