//! REST API layer: route handlers, OpenAPI document, and router composition.
//!
//! Vote and system endpoints are mounted at the root, matching the paths
//! clients already use (`/votes`, `/health`).

pub mod handlers;
pub mod openapi;

use axum::Router;

use crate::app_state::AppState;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(handlers::routes())
        .merge(handlers::system::routes())
}
