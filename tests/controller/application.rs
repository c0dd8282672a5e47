use axum::{extract::State, http::StatusCode, response::IntoResponse};
use chrono::{Duration, Utc};
use entity::{
    application::{ApplicationKind, ApplicationStatus},
    roster_user::Role,
};
use roster::{
    model::{
        application::{
            AdvanceStatusDto, ApplicationData, ApplicationDto, EligibilityDto, EligibilityQuery,
            ReviewQuery,
        },
        notification::NotificationDto,
    },
    server::controller::{
        application::{
            advance_application, check_eligibility, get_application, review_queue,
            submit_application,
        },
        notification::list_notifications,
        util::{
            auth::AuthUser,
            extract::{Json, Path, Query},
        },
    },
};

use super::*;

fn leave(start_in: i64, days: i64) -> ApplicationData {
    let today = Utc::now().date_naive();

    ApplicationData::Leave {
        start_date: today + Duration::days(start_in),
        end_date: today + Duration::days(start_in + days),
        reason: "Exams at university".to_string(),
    }
}

#[tokio::test]
/// Expect 201 with a pending application for an eligible member
async fn submit_returns_created() -> Result<(), TestError> {
    let test = TestBuilder::new().with_application_tables().build().await?;
    let member = test.user().insert_member("auth|1", None).await?;

    let result = submit_application(
        State(test.into_app_state()),
        AuthUser(member.clone()),
        Json(leave(2, 3)),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let application: ApplicationDto = json_body(resp).await;
    assert_eq!(application.author_id, member.id);
    assert_eq!(application.kind, ApplicationKind::Leave);
    assert_eq!(application.status, ApplicationStatus::Pending);
    assert_eq!(application.data, leave(2, 3));
    assert!(application.status_history.is_empty());

    Ok(())
}

#[tokio::test]
/// Expect 422 when a candidate submits a kind reserved for members
async fn submit_denied_is_unprocessable() -> Result<(), TestError> {
    let test = TestBuilder::new().with_application_tables().build().await?;
    let candidate = test.user().insert_user("auth|1", Role::Candidate).await?;

    let result = submit_application(
        State(test.into_app_state()),
        AuthUser(candidate),
        Json(leave(2, 3)),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

#[tokio::test]
/// Expect a denial with a reason for a candidate checking leave eligibility
async fn eligibility_reports_reason() -> Result<(), TestError> {
    let test = TestBuilder::new().with_application_tables().build().await?;
    let candidate = test.user().insert_user("auth|1", Role::Candidate).await?;

    let resp = check_eligibility(
        State(test.into_app_state()),
        AuthUser(candidate),
        Query(EligibilityQuery {
            kind: ApplicationKind::Leave,
        }),
    )
    .await
    .unwrap()
    .into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let eligibility: EligibilityDto = json_body(resp).await;
    assert!(!eligibility.allowed);
    assert!(eligibility.reason.is_some());

    Ok(())
}

#[tokio::test]
/// Expect 404 when a member reads another member's application
async fn get_hides_foreign_application() -> Result<(), TestError> {
    let test = TestBuilder::new().with_application_tables().build().await?;
    let author = test.user().insert_member("auth|1", None).await?;
    let other = test.user().insert_member("auth|2", None).await?;
    let application = test
        .application()
        .insert_application(
            author.id,
            ApplicationKind::Leave,
            ApplicationStatus::Pending,
            serde_json::to_value(leave(2, 3))?,
        )
        .await?;

    let result = get_application(
        State(test.into_app_state()),
        AuthUser(other),
        Path(application.id),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
/// Expect 403 when a member opens the review queue
async fn review_queue_requires_supervisor() -> Result<(), TestError> {
    let test = TestBuilder::new().with_application_tables().build().await?;
    let member = test.user().insert_member("auth|1", None).await?;

    let result = review_queue(
        State(test.into_app_state()),
        AuthUser(member),
        Query(ReviewQuery { status: None }),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
/// Expect approval to record the reviewer and notify the author
async fn advance_approves_and_notifies() -> Result<(), TestError> {
    let test = TestBuilder::new().with_application_tables().build().await?;
    let author = test.user().insert_member("auth|1", None).await?;
    let supervisor = test.user().insert_user("auth|2", Role::Supervisor).await?;
    let application = test
        .application()
        .insert_application(
            author.id,
            ApplicationKind::Leave,
            ApplicationStatus::Pending,
            serde_json::to_value(leave(5, 2))?,
        )
        .await?;
    let state = test.into_app_state();

    let resp = advance_application(
        State(state.clone()),
        AuthUser(supervisor.clone()),
        Path(application.id),
        Json(AdvanceStatusDto {
            status: ApplicationStatus::Approved,
            comment: Some("Enjoy".to_string()),
        }),
    )
    .await
    .unwrap()
    .into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let updated: ApplicationDto = json_body(resp).await;
    assert_eq!(updated.status, ApplicationStatus::Approved);
    assert_eq!(updated.reviewer_id, Some(supervisor.id));
    assert_eq!(updated.status_history.len(), 1);
    assert_eq!(updated.status_history[0].comment.as_deref(), Some("Enjoy"));

    let resp = list_notifications(State(state), AuthUser(author))
        .await
        .unwrap()
        .into_response();
    let notifications: Vec<NotificationDto> = json_body(resp).await;
    assert_eq!(notifications.len(), 1);
    assert!(!notifications[0].read);

    Ok(())
}

#[tokio::test]
/// Expect 409 for a transition the workflow does not allow
async fn advance_rejects_invalid_transition() -> Result<(), TestError> {
    let test = TestBuilder::new().with_application_tables().build().await?;
    let author = test.user().insert_member("auth|1", None).await?;
    let supervisor = test.user().insert_user("auth|2", Role::Supervisor).await?;
    let application = test
        .application()
        .insert_application(
            author.id,
            ApplicationKind::Leave,
            ApplicationStatus::Pending,
            serde_json::to_value(leave(5, 2))?,
        )
        .await?;

    let result = advance_application(
        State(test.into_app_state()),
        AuthUser(supervisor),
        Path(application.id),
        Json(AdvanceStatusDto {
            status: ApplicationStatus::Resolved,
            comment: None,
        }),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    Ok(())
}
