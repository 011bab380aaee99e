//! Service error types with HTTP status code mapping.
//!
//! [`VoteError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and structured JSON error response.
//! Server-side variants never expose store error text to the client; the
//! detail is logged instead.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "invalid vote payload: missing field `campaign_id`"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category   | HTTP Status                 |
/// |-----------|------------|-----------------------------|
/// | 1000–1999 | Validation | 400 Bad Request             |
/// | 3000–3999 | Server     | 500 / 503                   |
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VoteError {
    /// The connection pool could not be built, or startup configuration is
    /// invalid. Fatal for the lifetime of the service context.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Table creation failed for a reason other than "already exists".
    #[error("schema error: {0}")]
    Schema(String),

    /// The request body does not match the expected vote shape.
    #[error("invalid vote payload: {0}")]
    Decode(String),

    /// An insert or query failed at the store.
    #[error("storage error: {0}")]
    Storage(String),

    /// A stored row could not be converted into a [`crate::domain::Vote`].
    #[error("cannot decode column `{column}`: {reason}")]
    RowCoercion {
        /// Column that failed to decode.
        column: &'static str,
        /// Underlying decode failure.
        reason: String,
    },
}

impl VoteError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Decode(_) => 1001,
            Self::Storage(_) => 3001,
            Self::Configuration(_) => 3002,
            Self::Schema(_) => 3003,
            Self::RowCoercion { .. } => 3004,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Decode(_) => StatusCode::BAD_REQUEST,
            Self::Configuration(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Schema(_) | Self::Storage(_) | Self::RowCoercion { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the message sent to the client.
    ///
    /// Only decode failures echo detail, since they describe the caller's
    /// own input.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Decode(_) => self.to_string(),
            Self::Configuration(_) => "service unavailable".to_string(),
            Self::Schema(_) | Self::Storage(_) | Self::RowCoercion { .. } => {
                "internal server error".to_string()
            }
        }
    }
}

impl IntoResponse for VoteError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "request rejected");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.public_message(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
