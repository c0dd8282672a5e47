//! Error types for the Roster server.
//!
//! Domain errors (authentication, application workflow, configuration) are aggregated into a
//! single [`Error`] that handlers return. Every error renders as an `{"error": "..."}` JSON body
//! with a status code matching its cause; unexpected failures are logged and hidden behind a
//! generic 500.

pub mod application;
pub mod auth;
pub mod config;
pub mod retry;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{application::ApplicationError, auth::AuthError, config::ConfigError},
};

/// Main error type for the Roster server.
///
/// Uses `#[from]` so library and domain errors convert through `?`.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Bearer token or role check failed.
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Application rules or workflow rejected the request.
    #[error(transparent)]
    ApplicationError(#[from] ApplicationError),
    /// Requested resource does not exist.
    #[error("{0} not found")]
    NotFound(String),
    /// Request body or parameters failed validation.
    #[error("{0}")]
    Validation(String),
    /// Request conflicts with the current state of a resource.
    #[error("{0}")]
    Conflict(String),
    /// Internal error indicating a bug in Roster's code.
    #[error("Internal error: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Stored JSON column could not be (de)serialized.
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::AuthError(AuthError::InvalidToken(err))
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl Error {
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }
}

/// Renders a client error with the given status, logging it at debug level.
pub(crate) fn client_error(status: StatusCode, message: String) -> Response {
    tracing::debug!(status = %status, "{}", message);

    (status, Json(ErrorDto { error: message })).into_response()
}

/// Maps errors to HTTP responses.
///
/// - 400 Bad Request: validation failures
/// - 401/403: see [`AuthError`]
/// - 404 Not Found: missing resources
/// - 409 Conflict: conflicting state, invalid status transitions
/// - 422 Unprocessable Entity: application rule denials
/// - 500 Internal Server Error: everything else (logged, message hidden)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::ApplicationError(err) => err.into_response(),
            Self::NotFound(_) => client_error(StatusCode::NOT_FOUND, self.to_string()),
            Self::Validation(message) => client_error(StatusCode::BAD_REQUEST, message),
            Self::Conflict(message) => client_error(StatusCode::CONFLICT, message),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the full error and returns a generic message so implementation details never reach
/// the client.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
