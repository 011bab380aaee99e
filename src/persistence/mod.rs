//! Persistence layer: PostgreSQL connection pool, schema bootstrap, and the
//! vote repository.
//!
//! The pool and the schema are each initialized at most once per service
//! context; the repository is the only place SQL is issued.

pub mod pool;
pub mod postgres;
pub mod schema;

pub use pool::{ConnectionPool, PoolSettings};
pub use postgres::VoteRepository;
pub use schema::{SchemaInitializer, SchemaOutcome, TableName};
