//! Service layer: the operations exposed to the HTTP handlers.
//!
//! [`VoteService`] owns the shared [`crate::persistence::ConnectionPool`]
//! and the schema initializer, and runs both before touching storage.

pub mod vote_service;

pub use vote_service::VoteService;
