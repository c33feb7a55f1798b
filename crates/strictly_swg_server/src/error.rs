//! API error types.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use strictly_swg::SessionError;
use tracing::warn;

/// Error returned by session registry operations and HTTP handlers.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum ApiError {
    /// The game engine rejected the request.
    #[display("{}", _0)]
    #[from]
    Session(SessionError),

    /// No session with this ID.
    #[display("Session not found: {}", _0)]
    SessionNotFound(String),

    /// A session with this ID already exists.
    #[display("Session already exists: {}", _0)]
    SessionExists(String),

    /// The session cannot be removed.
    #[display("Session {} cannot be removed", _0)]
    ProtectedSession(String),

    /// The server already holds as many sessions as it allows.
    #[display("Session limit of {} reached; delete a session first", _0)]
    TooManySessions(usize),

    /// The request body is not the JSON this endpoint expects.
    #[display("Malformed request: {}", _0)]
    MalformedRequest(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedRequest(rejection.body_text())
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Session(e) => Some(e),
            _ => None,
        }
    }
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Session(SessionError::InvalidMove(_)) => StatusCode::BAD_REQUEST,
            ApiError::Session(SessionError::SessionTerminated { .. }) => StatusCode::CONFLICT,
            ApiError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::SessionExists(_) | ApiError::ProtectedSession(_) => StatusCode::CONFLICT,
            ApiError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::TooManySessions(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// JSON error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(status = status.as_u16(), error = %self, "Request rejected");
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
