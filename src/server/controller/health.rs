use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::model::api::MessageDto;

pub static HEALTH_TAG: &str = "health";

/// Liveness check
#[utoipa::path(
    get,
    path = "/api/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Server is up", body = MessageDto)
    ),
)]
pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(MessageDto {
            message: "ok".to_string(),
        }),
    )
}
