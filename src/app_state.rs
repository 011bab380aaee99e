//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::VoteService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Vote service owning the pool and schema state.
    pub vote_service: Arc<VoteService>,
}

impl AppState {
    /// Wraps a service context for sharing across handlers.
    #[must_use]
    pub fn new(vote_service: VoteService) -> Self {
        Self {
            vote_service: Arc::new(vote_service),
        }
    }
}
