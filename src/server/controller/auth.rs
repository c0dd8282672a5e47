use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    model::{
        api::ErrorDto,
        user::{RegisterDto, UserDto},
    },
    server::{
        controller::util::{
            auth::{AuthClaims, AuthUser},
            extract::Json,
        },
        error::Error,
        model::app::AppState,
        service::user::UserService,
    },
};

pub static AUTH_TAG: &str = "auth";

/// Complete registration for the bearer token's subject
///
/// Creates a candidate account from the token's claims and the chosen username.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "User registered", body = UserDto),
        (status = 400, description = "Invalid username", body = ErrorDto),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorDto),
        (status = 409, description = "Already registered or username taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Json(input): Json<RegisterDto>,
) -> Result<impl IntoResponse, Error> {
    let user = UserService::new(&state.db)
        .register(&claims, &input.username)
        .await?;

    Ok((StatusCode::CREATED, Json(UserDto::from(user))))
}

/// Get the currently authenticated user
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = AUTH_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Authenticated user", body = UserDto),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorDto),
        (status = 403, description = "Token subject is not registered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn me(AuthUser(user): AuthUser) -> Result<impl IntoResponse, Error> {
    Ok((StatusCode::OK, Json(UserDto::from(user))))
}
