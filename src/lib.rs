//! # vote-gateway
//!
//! REST service that records and lists campaign votes in PostgreSQL.
//!
//! The interesting part is small: one connection pool built exactly once
//! per service context, a `CREATE TABLE` that runs exactly once and treats
//! "already exists" as success, and strict marshalling between JSON bodies
//! and table rows.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── VoteService (service/)
//!     │
//!     ├── ConnectionPool ── SchemaInitializer (persistence/)
//!     ├── VoteRepository (persistence/)
//!     │
//!     └── PostgreSQL
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
