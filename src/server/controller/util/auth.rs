//! Bearer token extractors.
//!
//! [`AuthClaims`] only verifies the token, which is all registration needs. [`AuthUser`]
//! additionally loads the registered user the token belongs to.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use entity::roster_user::Role;

use crate::server::{
    error::{auth::AuthError, Error},
    model::{app::AppState, auth::Claims, db::UserModel},
    service::user::UserService,
};

/// Verified claims of the request's bearer token
pub struct AuthClaims(pub Claims);

/// Registered user the request's bearer token belongs to
pub struct AuthUser(pub UserModel);

impl AuthUser {
    /// Fails with 403 unless the user's role is at least `role`
    pub fn require(&self, role: Role) -> Result<&UserModel, Error> {
        if !self.0.role.at_least(role) {
            return Err(AuthError::Forbidden { required: role }.into());
        }

        Ok(&self.0)
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)
}

/// Verifies `token` and loads the user registered for its subject
pub async fn user_from_token(state: &AppState, token: &str) -> Result<UserModel, Error> {
    let claims = state.auth.verify(token)?;

    UserService::new(&state.db)
        .get_by_auth_id(&claims.sub)
        .await?
        .ok_or_else(|| AuthError::NotRegistered.into())
}

impl FromRequestParts<AppState> for AuthClaims {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        Ok(Self(state.auth.verify(token)?))
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        Ok(Self(user_from_token(state, token).await?))
    }
}
