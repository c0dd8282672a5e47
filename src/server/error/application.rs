use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use entity::application::ApplicationStatus;
use thiserror::Error;

use crate::server::error::client_error;

#[derive(Error, Debug, PartialEq)]
pub enum ApplicationError {
    /// Submission blocked by a quota, cooldown, overlap or role rule.
    #[error("{0}")]
    Denied(String),
    #[error("Cannot move application from {from:?} to {to:?}")]
    InvalidTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
    /// Stored payload does not match the application's kind.
    #[error("Application {0} has a malformed payload")]
    InvalidPayload(i32),
}

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        match self {
            Self::Denied(reason) => client_error(StatusCode::UNPROCESSABLE_ENTITY, reason),
            Self::InvalidTransition { .. } => client_error(StatusCode::CONFLICT, self.to_string()),
            Self::InvalidPayload(_) => {
                crate::server::error::InternalServerError(self).into_response()
            }
        }
    }
}
