use axum::{extract::State, http::StatusCode, response::IntoResponse};
use entity::roster_user::Role;

use crate::{
    model::{
        api::ErrorDto,
        exam::{
            CreateExamDto, ExamDto, ExamResultDto, ExamSessionDto, StartSessionDto,
            SubmitAnswersDto,
        },
    },
    server::{
        controller::util::{
            auth::AuthUser,
            extract::{Json, Path},
        },
        error::Error,
        model::app::AppState,
        service::exam::ExamService,
    },
};

pub static EXAM_TAG: &str = "exam";

/// List exams without their questions
#[utoipa::path(
    get,
    path = "/api/exams",
    tag = EXAM_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Exams", body = Vec<ExamDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_exams(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<impl IntoResponse, Error> {
    let exams = ExamService::new(&state.db).list().await?;

    Ok((StatusCode::OK, Json(exams)))
}

#[utoipa::path(
    post,
    path = "/api/admin/exams",
    tag = EXAM_TAG,
    request_body = CreateExamDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Exam created", body = ExamDto),
        (status = 400, description = "Invalid exam", body = ErrorDto),
        (status = 403, description = "Admin role required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_exam(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateExamDto>,
) -> Result<impl IntoResponse, Error> {
    user.require(Role::Admin)?;

    let exam = ExamService::new(&state.db).create(input).await?;

    Ok((StatusCode::CREATED, Json(exam)))
}

/// Start a timed attempt at an exam
///
/// The returned questions omit the correct answers.
#[utoipa::path(
    post,
    path = "/api/exams/{exam_id}/sessions",
    tag = EXAM_TAG,
    params(("exam_id" = i32, Path, description = "Exam ID")),
    request_body = StartSessionDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Session started", body = ExamSessionDto),
        (status = 404, description = "Exam or application not found", body = ErrorDto),
        (status = 400, description = "Application is not awaiting a test", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn start_session(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(exam_id): Path<i32>,
    Json(input): Json<StartSessionDto>,
) -> Result<impl IntoResponse, Error> {
    let session = ExamService::new(&state.db)
        .start_session(user.id, exam_id, input.application_id)
        .await?;

    Ok((StatusCode::CREATED, Json(session)))
}

/// Submit answers for an open session
///
/// Grading a session linked to an application moves that application to `resolved` or
/// `test_failed`.
#[utoipa::path(
    post,
    path = "/api/exam-sessions/{session_id}/submit",
    tag = EXAM_TAG,
    params(("session_id" = i32, Path, description = "Exam session ID")),
    request_body = SubmitAnswersDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Graded result", body = ExamResultDto),
        (status = 400, description = "Session expired or wrong number of answers", body = ErrorDto),
        (status = 404, description = "Session not found", body = ErrorDto),
        (status = 409, description = "Session already submitted", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn submit_session(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(session_id): Path<i32>,
    Json(input): Json<SubmitAnswersDto>,
) -> Result<impl IntoResponse, Error> {
    let result = ExamService::new(&state.db)
        .submit(user.id, session_id, input.answers)
        .await?;

    Ok((StatusCode::OK, Json(ExamResultDto::from(result))))
}

#[utoipa::path(
    get,
    path = "/api/exam-results",
    tag = EXAM_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own exam results", body = Vec<ExamResultDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_results(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, Error> {
    let results = ExamService::new(&state.db).list_results(user.id).await?;
    let results: Vec<ExamResultDto> = results.into_iter().map(ExamResultDto::from).collect();

    Ok((StatusCode::OK, Json(results)))
}
