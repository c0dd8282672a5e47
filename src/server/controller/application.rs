use axum::{extract::State, http::StatusCode, response::IntoResponse};
use entity::roster_user::Role;

use crate::{
    model::{
        api::ErrorDto,
        application::{
            AdvanceStatusDto, ApplicationData, ApplicationDto, EligibilityDto, EligibilityQuery,
            ReviewQuery,
        },
    },
    server::{
        controller::util::{
            auth::AuthUser,
            extract::{Json, Path, Query},
        },
        error::Error,
        model::{app::AppState, db::ApplicationModel},
        service::application::{eligibility::Eligibility, ApplicationService},
    },
};

pub static APPLICATION_TAG: &str = "application";

fn to_dtos(applications: Vec<ApplicationModel>) -> Result<Vec<ApplicationDto>, Error> {
    applications
        .into_iter()
        .map(|application| ApplicationDto::try_from(application).map_err(Error::from))
        .collect()
}

/// Submit an application
///
/// The payload's `kind` selects the application kind. Quotas, cooldowns and role rules for that
/// kind are checked before anything is stored.
#[utoipa::path(
    post,
    path = "/api/applications",
    tag = APPLICATION_TAG,
    request_body = ApplicationData,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Application submitted", body = ApplicationDto),
        (status = 400, description = "Invalid payload", body = ErrorDto),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorDto),
        (status = 422, description = "Not eligible for this kind of application", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn submit_application(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(data): Json<ApplicationData>,
) -> Result<impl IntoResponse, Error> {
    let application = ApplicationService::new(&state.db)
        .submit(&user, data)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApplicationDto::try_from(application)?),
    ))
}

/// List the current user's applications, newest first
#[utoipa::path(
    get,
    path = "/api/applications",
    tag = APPLICATION_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own applications", body = Vec<ApplicationDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_applications(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, Error> {
    let applications = ApplicationService::new(&state.db).list_own(user.id).await?;

    Ok((StatusCode::OK, Json(to_dtos(applications)?)))
}

/// Check whether the current user may submit an application of the given kind
#[utoipa::path(
    get,
    path = "/api/applications/eligibility",
    tag = APPLICATION_TAG,
    params(EligibilityQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Eligibility verdict", body = EligibilityDto),
        (status = 400, description = "Unknown application kind", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn check_eligibility(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<EligibilityQuery>,
) -> Result<impl IntoResponse, Error> {
    let eligibility = ApplicationService::new(&state.db)
        .eligibility(&user, query.kind)
        .await?;

    let dto = match eligibility {
        Eligibility::Allowed => EligibilityDto {
            allowed: true,
            reason: None,
        },
        Eligibility::Denied { reason } => EligibilityDto {
            allowed: false,
            reason: Some(reason),
        },
    };

    Ok((StatusCode::OK, Json(dto)))
}

/// Get a single application
///
/// Authors can read their own applications, supervisors can read any.
#[utoipa::path(
    get,
    path = "/api/applications/{application_id}",
    tag = APPLICATION_TAG,
    params(("application_id" = i32, Path, description = "Application ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Application", body = ApplicationDto),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_application(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(application_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let application = ApplicationService::new(&state.db)
        .get_visible(&user, application_id)
        .await?;

    Ok((StatusCode::OK, Json(ApplicationDto::try_from(application)?)))
}

/// Review queue, optionally filtered by status
#[utoipa::path(
    get,
    path = "/api/admin/applications",
    tag = APPLICATION_TAG,
    params(ReviewQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Applications awaiting review", body = Vec<ApplicationDto>),
        (status = 403, description = "Supervisor role required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn review_queue(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ReviewQuery>,
) -> Result<impl IntoResponse, Error> {
    user.require(Role::Supervisor)?;

    let applications = ApplicationService::new(&state.db)
        .review_queue(query.status)
        .await?;

    Ok((StatusCode::OK, Json(to_dtos(applications)?)))
}

/// Move an application to a new status
///
/// Approving or resolving an application applies its side effects, such as moving the author to
/// the target department, and notifies the author.
#[utoipa::path(
    post,
    path = "/api/admin/applications/{application_id}/status",
    tag = APPLICATION_TAG,
    params(("application_id" = i32, Path, description = "Application ID")),
    request_body = AdvanceStatusDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Updated application", body = ApplicationDto),
        (status = 403, description = "Supervisor role required", body = ErrorDto),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 409, description = "Transition not allowed from the current status", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn advance_application(
    State(state): State<AppState>,
    user: AuthUser,
    Path(application_id): Path<i32>,
    Json(input): Json<AdvanceStatusDto>,
) -> Result<impl IntoResponse, Error> {
    let reviewer = user.require(Role::Supervisor)?;

    let application = ApplicationService::new(&state.db)
        .advance(reviewer, application_id, input.status, input.comment)
        .await?;

    Ok((StatusCode::OK, Json(ApplicationDto::try_from(application)?)))
}
