use axum::{extract::State, http::StatusCode, response::IntoResponse};
use entity::roster_user::Role;

use crate::{
    model::{
        api::ErrorDto,
        template::{CreateTemplateDto, FilledReportDto, SubmitFilledReportDto, TemplateDto},
    },
    server::{
        controller::util::{
            auth::AuthUser,
            extract::{Json, Path},
        },
        error::Error,
        model::app::AppState,
        service::template::TemplateService,
    },
};

pub static TEMPLATE_TAG: &str = "template";

/// List active report templates
#[utoipa::path(
    get,
    path = "/api/templates",
    tag = TEMPLATE_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active templates", body = Vec<TemplateDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_templates(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<impl IntoResponse, Error> {
    let templates = TemplateService::new(&state.db).list_active().await?;

    Ok((StatusCode::OK, Json(templates)))
}

#[utoipa::path(
    get,
    path = "/api/templates/{template_id}",
    tag = TEMPLATE_TAG,
    params(("template_id" = i32, Path, description = "Template ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Template", body = TemplateDto),
        (status = 404, description = "Template not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_template(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(template_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let template = TemplateService::new(&state.db).get(template_id).await?;

    Ok((StatusCode::OK, Json(template)))
}

/// Create a report template
#[utoipa::path(
    post,
    path = "/api/admin/templates",
    tag = TEMPLATE_TAG,
    request_body = CreateTemplateDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Template created", body = TemplateDto),
        (status = 400, description = "Invalid field definitions", body = ErrorDto),
        (status = 403, description = "Admin role required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_template(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateTemplateDto>,
) -> Result<impl IntoResponse, Error> {
    let admin = user.require(Role::Admin)?;

    let template = TemplateService::new(&state.db)
        .create(admin.id, input)
        .await?;

    Ok((StatusCode::CREATED, Json(template)))
}

/// Fill in a template
///
/// Values are checked against the template's field definitions.
#[utoipa::path(
    post,
    path = "/api/templates/{template_id}/reports",
    tag = TEMPLATE_TAG,
    params(("template_id" = i32, Path, description = "Template ID")),
    request_body = SubmitFilledReportDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Report submitted", body = FilledReportDto),
        (status = 400, description = "Values do not match the template", body = ErrorDto),
        (status = 404, description = "Template not found", body = ErrorDto),
        (status = 409, description = "Template is inactive", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn submit_filled_report(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(template_id): Path<i32>,
    Json(input): Json<SubmitFilledReportDto>,
) -> Result<impl IntoResponse, Error> {
    let report = TemplateService::new(&state.db)
        .submit(user.id, template_id, input.values)
        .await?;

    Ok((StatusCode::CREATED, Json(FilledReportDto::from(report))))
}

#[utoipa::path(
    get,
    path = "/api/templates/{template_id}/reports",
    tag = TEMPLATE_TAG,
    params(("template_id" = i32, Path, description = "Template ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Reports filed against the template", body = Vec<FilledReportDto>),
        (status = 403, description = "Supervisor role required", body = ErrorDto),
        (status = 404, description = "Template not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_template_reports(
    State(state): State<AppState>,
    user: AuthUser,
    Path(template_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    user.require(Role::Supervisor)?;

    let reports = TemplateService::new(&state.db)
        .list_reports(template_id)
        .await?;
    let reports: Vec<FilledReportDto> = reports.into_iter().map(FilledReportDto::from).collect();

    Ok((StatusCode::OK, Json(reports)))
}

/// List the current user's filled reports
#[utoipa::path(
    get,
    path = "/api/filled-reports",
    tag = TEMPLATE_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own filled reports", body = Vec<FilledReportDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_filled_reports(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, Error> {
    let reports = TemplateService::new(&state.db)
        .list_own_reports(user.id)
        .await?;
    let reports: Vec<FilledReportDto> = reports.into_iter().map(FilledReportDto::from).collect();

    Ok((StatusCode::OK, Json(reports)))
}
