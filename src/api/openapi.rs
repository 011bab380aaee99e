//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use crate::api::handlers::{system, votes};
use crate::domain::{NewVote, Vote};
use crate::error::{ErrorBody, ErrorResponse};

/// Generated OpenAPI description, served by Swagger UI when the
/// `swagger-ui` feature is enabled.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "vote-gateway",
        description = "Records and lists campaign votes backed by PostgreSQL."
    ),
    paths(votes::submit_vote, votes::list_votes, system::health_handler),
    components(schemas(Vote, NewVote, ErrorResponse, ErrorBody, system::HealthResponse)),
    tags(
        (name = "Votes", description = "Vote submission and listing"),
        (name = "System", description = "Service health"),
    )
)]
pub struct ApiDoc;
