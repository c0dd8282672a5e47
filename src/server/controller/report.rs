//! Activity reports, support tickets and complaints.
//!
//! Each has an author-facing half (file, list own) and a staff half under `/api/admin`
//! restricted to supervisors.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use entity::roster_user::Role;

use crate::{
    model::{
        api::ErrorDto,
        report::{
            ComplaintDto, CreateComplaintDto, CreateReportDto, CreateTicketDto, ReportDto,
            TicketDto, UpdateComplaintDto, UpdateReportStatusDto, UpdateTicketDto,
        },
    },
    server::{
        controller::util::{
            auth::AuthUser,
            extract::{Json, Path},
        },
        error::Error,
        model::app::AppState,
        service::report::{ComplaintService, ReportService, SupportService},
    },
};

pub static REPORT_TAG: &str = "report";
pub static SUPPORT_TAG: &str = "support";
pub static COMPLAINT_TAG: &str = "complaint";

/// File an activity report
#[utoipa::path(
    post,
    path = "/api/reports",
    tag = REPORT_TAG,
    request_body = CreateReportDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Report filed", body = ReportDto),
        (status = 400, description = "Invalid report", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_report(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(input): Json<CreateReportDto>,
) -> Result<impl IntoResponse, Error> {
    let report = ReportService::new(&state.db).create(user.id, input).await?;

    Ok((StatusCode::CREATED, Json(ReportDto::from(report))))
}

/// List the current user's reports
#[utoipa::path(
    get,
    path = "/api/reports",
    tag = REPORT_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own reports", body = Vec<ReportDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_reports(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, Error> {
    let reports = ReportService::new(&state.db).list_own(user.id).await?;
    let reports: Vec<ReportDto> = reports.into_iter().map(ReportDto::from).collect();

    Ok((StatusCode::OK, Json(reports)))
}

#[utoipa::path(
    get,
    path = "/api/admin/reports",
    tag = REPORT_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All reports", body = Vec<ReportDto>),
        (status = 403, description = "Supervisor role required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_all_reports(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, Error> {
    user.require(Role::Supervisor)?;

    let reports = ReportService::new(&state.db).list_all().await?;
    let reports: Vec<ReportDto> = reports.into_iter().map(ReportDto::from).collect();

    Ok((StatusCode::OK, Json(reports)))
}

#[utoipa::path(
    put,
    path = "/api/admin/reports/{report_id}/status",
    tag = REPORT_TAG,
    params(("report_id" = i32, Path, description = "Report ID")),
    request_body = UpdateReportStatusDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Report updated", body = ReportDto),
        (status = 403, description = "Supervisor role required", body = ErrorDto),
        (status = 404, description = "Report not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_report_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(report_id): Path<i32>,
    Json(input): Json<UpdateReportStatusDto>,
) -> Result<impl IntoResponse, Error> {
    user.require(Role::Supervisor)?;

    let report = ReportService::new(&state.db)
        .update_status(report_id, input.status)
        .await?;

    Ok((StatusCode::OK, Json(ReportDto::from(report))))
}

/// Open a support ticket
#[utoipa::path(
    post,
    path = "/api/support",
    tag = SUPPORT_TAG,
    request_body = CreateTicketDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Ticket opened", body = TicketDto),
        (status = 400, description = "Invalid ticket", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_ticket(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(input): Json<CreateTicketDto>,
) -> Result<impl IntoResponse, Error> {
    let ticket = SupportService::new(&state.db).create(user.id, input).await?;

    Ok((StatusCode::CREATED, Json(TicketDto::from(ticket))))
}

#[utoipa::path(
    get,
    path = "/api/support",
    tag = SUPPORT_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own tickets", body = Vec<TicketDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_tickets(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, Error> {
    let tickets = SupportService::new(&state.db).list_own(user.id).await?;
    let tickets: Vec<TicketDto> = tickets.into_iter().map(TicketDto::from).collect();

    Ok((StatusCode::OK, Json(tickets)))
}

#[utoipa::path(
    get,
    path = "/api/admin/support",
    tag = SUPPORT_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All tickets", body = Vec<TicketDto>),
        (status = 403, description = "Supervisor role required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_all_tickets(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, Error> {
    user.require(Role::Supervisor)?;

    let tickets = SupportService::new(&state.db).list_all().await?;
    let tickets: Vec<TicketDto> = tickets.into_iter().map(TicketDto::from).collect();

    Ok((StatusCode::OK, Json(tickets)))
}

/// Answer or close a support ticket
///
/// The ticket's author is notified of the new status.
#[utoipa::path(
    put,
    path = "/api/admin/support/{ticket_id}",
    tag = SUPPORT_TAG,
    params(("ticket_id" = i32, Path, description = "Ticket ID")),
    request_body = UpdateTicketDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Ticket updated", body = TicketDto),
        (status = 403, description = "Supervisor role required", body = ErrorDto),
        (status = 404, description = "Ticket not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_ticket(
    State(state): State<AppState>,
    user: AuthUser,
    Path(ticket_id): Path<i32>,
    Json(input): Json<UpdateTicketDto>,
) -> Result<impl IntoResponse, Error> {
    user.require(Role::Supervisor)?;

    let ticket = SupportService::new(&state.db)
        .update(ticket_id, input)
        .await?;

    Ok((StatusCode::OK, Json(TicketDto::from(ticket))))
}

/// File a complaint, optionally against another user
#[utoipa::path(
    post,
    path = "/api/complaints",
    tag = COMPLAINT_TAG,
    request_body = CreateComplaintDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Complaint filed", body = ComplaintDto),
        (status = 400, description = "Invalid complaint", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_complaint(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(input): Json<CreateComplaintDto>,
) -> Result<impl IntoResponse, Error> {
    let complaint = ComplaintService::new(&state.db)
        .create(user.id, input)
        .await?;

    Ok((StatusCode::CREATED, Json(ComplaintDto::from(complaint))))
}

#[utoipa::path(
    get,
    path = "/api/complaints",
    tag = COMPLAINT_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own complaints", body = Vec<ComplaintDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_complaints(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, Error> {
    let complaints = ComplaintService::new(&state.db).list_own(user.id).await?;
    let complaints: Vec<ComplaintDto> = complaints.into_iter().map(ComplaintDto::from).collect();

    Ok((StatusCode::OK, Json(complaints)))
}

#[utoipa::path(
    get,
    path = "/api/admin/complaints",
    tag = COMPLAINT_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All complaints", body = Vec<ComplaintDto>),
        (status = 403, description = "Supervisor role required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_all_complaints(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, Error> {
    user.require(Role::Supervisor)?;

    let complaints = ComplaintService::new(&state.db).list_all().await?;
    let complaints: Vec<ComplaintDto> = complaints.into_iter().map(ComplaintDto::from).collect();

    Ok((StatusCode::OK, Json(complaints)))
}

#[utoipa::path(
    put,
    path = "/api/admin/complaints/{complaint_id}",
    tag = COMPLAINT_TAG,
    params(("complaint_id" = i32, Path, description = "Complaint ID")),
    request_body = UpdateComplaintDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Complaint updated", body = ComplaintDto),
        (status = 403, description = "Supervisor role required", body = ErrorDto),
        (status = 404, description = "Complaint not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_complaint(
    State(state): State<AppState>,
    user: AuthUser,
    Path(complaint_id): Path<i32>,
    Json(input): Json<UpdateComplaintDto>,
) -> Result<impl IntoResponse, Error> {
    user.require(Role::Supervisor)?;

    let complaint = ComplaintService::new(&state.db)
        .update(complaint_id, input)
        .await?;

    Ok((StatusCode::OK, Json(ComplaintDto::from(complaint))))
}
