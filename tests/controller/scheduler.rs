use axum::{extract::State, http::StatusCode, response::IntoResponse};
use entity::roster_user::Role;
use roster::{
    model::scheduler::{JobRunDto, JobStatusDto},
    server::{
        controller::{
            scheduler::{run, status},
            util::{auth::AuthUser, extract::Path},
        },
        service::user::UserService,
    },
};

use super::*;

async fn setup() -> Result<TestContext, TestError> {
    TestBuilder::new()
        .with_application_tables()
        .with_table(entity::prelude::SchedulerRun)
        .build()
        .await
}

#[tokio::test]
/// Expect both jobs listed with their default cron and no recorded run
async fn status_lists_jobs() -> Result<(), TestError> {
    let test = setup().await?;
    let supervisor = test.user().insert_user("auth|1", Role::Supervisor).await?;

    let resp = status(State(test.into_app_state()), AuthUser(supervisor))
        .await
        .unwrap()
        .into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let jobs: Vec<JobStatusDto> = json_body(resp).await;
    assert_eq!(jobs.len(), 2);
    assert!(jobs
        .iter()
        .any(|job| job.job == "monthly_reset" && job.cron == "0 0 0 1 * *"));
    assert!(jobs.iter().all(|job| job.last_run_at.is_none()));

    Ok(())
}

#[tokio::test]
/// Expect 404 for a job name that is not scheduled
async fn run_unknown_job() -> Result<(), TestError> {
    let test = setup().await?;
    let admin = test.user().insert_user("auth|1", Role::Admin).await?;

    let result = run(
        State(test.into_app_state()),
        AuthUser(admin),
        Path("weekly_purge".to_string()),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
/// Expect 403 when a supervisor forces a run
async fn run_requires_admin() -> Result<(), TestError> {
    let test = setup().await?;
    let supervisor = test.user().insert_user("auth|1", Role::Supervisor).await?;

    let result = run(
        State(test.into_app_state()),
        AuthUser(supervisor),
        Path("monthly_reset".to_string()),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
/// Expect a forced monthly reset to clear warnings and record the run
async fn forced_monthly_reset_runs_and_records() -> Result<(), TestError> {
    let test = setup().await?;
    let admin = test.user().insert_user("auth|1", Role::Admin).await?;
    let member = test.user().insert_member("auth|2", None).await?;
    UserService::new(&test.db)
        .add_warning(member.id, "Fail RP")
        .await
        .unwrap();
    let state = test.into_app_state();

    let resp = run(
        State(state.clone()),
        AuthUser(admin.clone()),
        Path("monthly_reset".to_string()),
    )
    .await
    .unwrap()
    .into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let outcome: JobRunDto = json_body(resp).await;
    assert_eq!(outcome.job, "monthly_reset");
    assert_eq!(outcome.affected, 1);

    let stored = test.user().reload(member.id).await?.unwrap();
    assert_eq!(stored.monthly_warnings, 0);
    assert_eq!(stored.warnings, 1);

    let resp = status(State(state), AuthUser(admin))
        .await
        .unwrap()
        .into_response();
    let jobs: Vec<JobStatusDto> = json_body(resp).await;
    let reset = jobs.iter().find(|job| job.job == "monthly_reset").unwrap();
    assert!(reset.last_run_at.is_some());

    Ok(())
}
