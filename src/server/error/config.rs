//! Startup configuration errors.
//!
//! Raised by [`Config::from_env`](crate::server::config::Config::from_env) while reading
//! `DATABASE_URL`, `AUTH_JWT_SECRET` and the optional scheduler and bind overrides. `main`
//! logs them and exits before the server binds.

use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::server::error::InternalServerError;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required variable such as `DATABASE_URL` is unset
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
    /// A variable is set but unusable, e.g. a blank `AUTH_JWT_SECRET`
    #[error("Invalid value for environment variable {var}: {reason}")]
    InvalidEnvValue { var: String, reason: String },
}

impl ConfigError {
    pub fn invalid(var: &str, reason: impl Into<String>) -> Self {
        Self::InvalidEnvValue {
            var: var.to_string(),
            reason: reason.into(),
        }
    }
}

/// Never reached from a request in practice; rendered as an opaque 500 if it is.
impl IntoResponse for ConfigError {
    fn into_response(self) -> Response {
        InternalServerError(self).into_response()
    }
}
