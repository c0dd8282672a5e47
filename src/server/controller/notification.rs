use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    model::{
        api::ErrorDto,
        notification::{MarkedReadDto, NotificationDto},
    },
    server::{
        controller::util::{
            auth::AuthUser,
            extract::{Json, Path},
        },
        error::Error,
        model::app::AppState,
        service::notification::NotificationService,
    },
};

pub static NOTIFICATION_TAG: &str = "notification";

/// List the current user's notifications, newest first
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = NOTIFICATION_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Notifications", body = Vec<NotificationDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, Error> {
    let notifications = NotificationService::new(&state.db).list(user.id).await?;
    let notifications: Vec<NotificationDto> = notifications
        .into_iter()
        .map(NotificationDto::from)
        .collect();

    Ok((StatusCode::OK, Json(notifications)))
}

/// Mark one notification as read
#[utoipa::path(
    post,
    path = "/api/notifications/{notification_id}/read",
    tag = NOTIFICATION_TAG,
    params(("notification_id" = i32, Path, description = "Notification ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Notification marked as read", body = NotificationDto),
        (status = 404, description = "Notification not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn mark_read(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(notification_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let notification = NotificationService::new(&state.db)
        .mark_read(user.id, notification_id)
        .await?;

    Ok((StatusCode::OK, Json(NotificationDto::from(notification))))
}

/// Mark every notification of the current user as read
#[utoipa::path(
    post,
    path = "/api/notifications/read-all",
    tag = NOTIFICATION_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Number of notifications marked", body = MarkedReadDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn mark_all_read(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, Error> {
    let updated = NotificationService::new(&state.db)
        .mark_all_read(user.id)
        .await?;

    Ok((StatusCode::OK, Json(MarkedReadDto { updated })))
}
