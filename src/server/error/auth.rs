use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use entity::roster_user::Role;
use thiserror::Error;

use crate::server::error::client_error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,
    #[error("Invalid bearer token: {0}")]
    InvalidToken(jsonwebtoken::errors::Error),
    #[error("No registered user for this account, register first")]
    NotRegistered,
    #[error("This account is already registered")]
    AlreadyRegistered,
    #[error("Requires role {required:?} or above")]
    Forbidden { required: Role },
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingToken => client_error(StatusCode::UNAUTHORIZED, self.to_string()),
            Self::InvalidToken(ref err) => {
                tracing::debug!(reason = %err, "Rejected bearer token");

                client_error(
                    StatusCode::UNAUTHORIZED,
                    "Invalid or expired bearer token".to_string(),
                )
            }
            Self::NotRegistered => client_error(StatusCode::FORBIDDEN, self.to_string()),
            Self::AlreadyRegistered => client_error(StatusCode::CONFLICT, self.to_string()),
            Self::Forbidden { .. } => client_error(StatusCode::FORBIDDEN, self.to_string()),
        }
    }
}
