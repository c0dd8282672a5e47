use axum::{extract::State, http::StatusCode, response::IntoResponse};
use entity::roster_user::Role;

use crate::{
    model::{
        api::ErrorDto,
        user::{UpdateRoleDto, UserDto, WarningDto},
    },
    server::{
        controller::util::{
            auth::AuthUser,
            extract::{Json, Path},
        },
        error::Error,
        model::app::AppState,
        service::user::UserService,
    },
};

pub static USER_TAG: &str = "user";

/// List every registered user
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = USER_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All users", body = Vec<UserDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorDto),
        (status = 403, description = "Admin role required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, Error> {
    user.require(Role::Admin)?;

    let users = UserService::new(&state.db).list().await?;
    let users: Vec<UserDto> = users.into_iter().map(UserDto::from).collect();

    Ok((StatusCode::OK, Json(users)))
}

/// Change a user's role
#[utoipa::path(
    put,
    path = "/api/admin/users/{user_id}/role",
    tag = USER_TAG,
    params(("user_id" = i32, Path, description = "User ID")),
    request_body = UpdateRoleDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Updated user", body = UserDto),
        (status = 403, description = "Admin role required", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_role(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<i32>,
    Json(input): Json<UpdateRoleDto>,
) -> Result<impl IntoResponse, Error> {
    user.require(Role::Admin)?;

    let updated = UserService::new(&state.db)
        .update_role(user_id, input.role)
        .await?;

    Ok((StatusCode::OK, Json(UserDto::from(updated))))
}

/// Issue a warning to a user
///
/// Increments the user's lifetime and monthly warning counters and notifies them.
#[utoipa::path(
    post,
    path = "/api/admin/users/{user_id}/warnings",
    tag = USER_TAG,
    params(("user_id" = i32, Path, description = "User ID")),
    request_body = WarningDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Warned user", body = UserDto),
        (status = 400, description = "Empty reason", body = ErrorDto),
        (status = 403, description = "Admin role required", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_warning(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<i32>,
    Json(input): Json<WarningDto>,
) -> Result<impl IntoResponse, Error> {
    user.require(Role::Admin)?;

    let warned = UserService::new(&state.db)
        .add_warning(user_id, &input.reason)
        .await?;

    Ok((StatusCode::OK, Json(UserDto::from(warned))))
}
