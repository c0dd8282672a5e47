use axum::{extract::State, http::StatusCode, response::IntoResponse};
use entity::roster_user::Role;

use crate::{
    model::{
        api::ErrorDto,
        scheduler::{JobRunDto, JobStatusDto},
    },
    server::{
        controller::util::{
            auth::AuthUser,
            extract::{Json, Path},
        },
        error::Error,
        model::app::AppState,
        scheduler::jobs::{job_statuses, run_job, JobOutcome, ScheduledJob},
    },
};

pub static SCHEDULER_TAG: &str = "scheduler";

/// Scheduled jobs with their cron expression and last run
#[utoipa::path(
    get,
    path = "/api/scheduler/status",
    tag = SCHEDULER_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Job status", body = Vec<JobStatusDto>),
        (status = 403, description = "Supervisor role required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn status(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, Error> {
    user.require(Role::Supervisor)?;

    let jobs = job_statuses(&state.db, &state.schedule).await?;

    Ok((StatusCode::OK, Json(jobs)))
}

/// Run a job now, even if it already ran this period
#[utoipa::path(
    post,
    path = "/api/scheduler/run/{job}",
    tag = SCHEDULER_TAG,
    params(("job" = String, Path, description = "Job name, `monthly_reset` or `leave_sweep`")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Job ran", body = JobRunDto),
        (status = 403, description = "Admin role required", body = ErrorDto),
        (status = 404, description = "Unknown job", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn run(
    State(state): State<AppState>,
    user: AuthUser,
    Path(job): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let admin = user.require(Role::Admin)?;

    let Some(scheduled) = ScheduledJob::from_name(&job) else {
        return Err(Error::not_found(format!("Job {}", job)));
    };

    let affected = match run_job(&state.db, scheduled, true).await? {
        JobOutcome::Ran { affected } => affected,
        JobOutcome::Skipped => 0,
    };

    tracing::info!(job = scheduled.name(), admin_id = admin.id, affected, "Forced job run");

    Ok((
        StatusCode::OK,
        Json(JobRunDto {
            job: scheduled.name().to_string(),
            affected,
        }),
    ))
}
