use chrono::Utc;
use entity::roster_user::Role;
use sea_orm::{ActiveModelTrait, ActiveValue, EntityTrait};

use crate::server::service::application::ApplicationService;

use super::*;

/// Expect Validation for an exam whose answer key points outside its options
#[tokio::test]
async fn rejects_invalid_answer_key() -> Result<(), TestError> {
    let test = setup().await?;

    let mut input = exam_input(50);
    input.questions.push(question(5));

    let exam_service = ExamService::new(&test.db);
    let result = exam_service.create(input).await;

    assert!(matches!(result, Err(Error::Validation(_))));

    Ok(())
}

/// Expect a started session to hide answer keys and a passing submission to resolve the
/// linked application
#[tokio::test]
async fn passing_resolves_linked_application() -> Result<(), TestError> {
    let test = setup().await?;
    let member = test.user().insert_member("auth|1", None).await?;
    let application = test
        .application()
        .insert_application(
            member.id,
            ApplicationKind::Qualification,
            ApplicationStatus::TestRequired,
            serde_json::json!({"kind": "qualification", "qualification": "Air support", "reason": "Pilot"}),
        )
        .await?;

    let exam_service = ExamService::new(&test.db);
    let exam = exam_service.create(exam_input(50)).await.unwrap();
    assert_eq!(exam.question_count, 2);

    let session = exam_service
        .start_session(member.id, exam.id, Some(application.id))
        .await
        .unwrap();
    assert_eq!(session.questions.len(), 2);
    assert!(session.expires_at > session.started_at);

    let result = exam_service
        .submit(member.id, session.id, vec![1, 0])
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let result = result.unwrap();
    assert_eq!(result.score, 100);
    assert!(result.passed);

    let stored = entity::prelude::Application::find_by_id(application.id)
        .one(&test.db)
        .await?
        .unwrap();
    assert_eq!(stored.status, ApplicationStatus::Resolved);

    let history: Vec<crate::model::application::StatusChange> =
        serde_json::from_value(stored.status_history)?;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].changed_by, None);

    Ok(())
}

/// Expect a failing submission to move the linked application to test_failed
#[tokio::test]
async fn failing_marks_test_failed() -> Result<(), TestError> {
    let test = setup().await?;
    let member = test.user().insert_member("auth|1", None).await?;
    let application = test
        .application()
        .insert_application(
            member.id,
            ApplicationKind::Qualification,
            ApplicationStatus::TestRequired,
            serde_json::json!({"kind": "qualification", "qualification": "Air support", "reason": "Pilot"}),
        )
        .await?;

    let exam_service = ExamService::new(&test.db);
    let exam = exam_service.create(exam_input(100)).await.unwrap();
    let session = exam_service
        .start_session(member.id, exam.id, Some(application.id))
        .await
        .unwrap();

    let result = exam_service
        .submit(member.id, session.id, vec![1, 2])
        .await
        .unwrap();

    assert_eq!(result.score, 50);
    assert!(!result.passed);

    let stored = entity::prelude::Application::find_by_id(application.id)
        .one(&test.db)
        .await?
        .unwrap();
    assert_eq!(stored.status, ApplicationStatus::TestFailed);

    Ok(())
}

/// Expect Validation when linking an application that is not waiting for a test
#[tokio::test]
async fn rejects_application_not_waiting_for_test() -> Result<(), TestError> {
    let test = setup().await?;
    let member = test.user().insert_member("auth|1", None).await?;
    let application = test
        .application()
        .insert_application(
            member.id,
            ApplicationKind::Qualification,
            ApplicationStatus::Pending,
            serde_json::json!({"kind": "qualification", "qualification": "Air support", "reason": "Pilot"}),
        )
        .await?;

    let exam_service = ExamService::new(&test.db);
    let exam = exam_service.create(exam_input(50)).await.unwrap();
    let result = exam_service
        .start_session(member.id, exam.id, Some(application.id))
        .await;

    assert!(matches!(result, Err(Error::Validation(_))));

    Ok(())
}

/// Expect Conflict on a second submission and NotFound for another user's session
#[tokio::test]
async fn session_is_submitted_once_by_its_owner() -> Result<(), TestError> {
    let test = setup().await?;
    let member = test.user().insert_member("auth|1", None).await?;
    let other = test.user().insert_member("auth|2", None).await?;

    let exam_service = ExamService::new(&test.db);
    let exam = exam_service.create(exam_input(50)).await.unwrap();
    let session = exam_service
        .start_session(member.id, exam.id, None)
        .await
        .unwrap();

    let foreign = exam_service.submit(other.id, session.id, vec![1, 0]).await;
    assert!(matches!(foreign, Err(Error::NotFound(_))));

    let wrong_count = exam_service.submit(member.id, session.id, vec![1]).await;
    assert!(matches!(wrong_count, Err(Error::Validation(_))));

    exam_service
        .submit(member.id, session.id, vec![1, 0])
        .await
        .unwrap();
    let again = exam_service.submit(member.id, session.id, vec![1, 0]).await;
    assert!(matches!(again, Err(Error::Conflict(_))));

    assert_eq!(exam_service.list_results(member.id).await.unwrap().len(), 1);

    Ok(())
}

/// Expect a failed test to be retaken after review and the second attempt to resolve the
/// application
#[tokio::test]
async fn failed_test_can_be_retaken() -> Result<(), TestError> {
    let test = setup().await?;
    let member = test.user().insert_member("auth|1", None).await?;
    let admin = test.user().insert_user("auth|admin", Role::Admin).await?;
    let application = test
        .application()
        .insert_application(
            member.id,
            ApplicationKind::Qualification,
            ApplicationStatus::TestRequired,
            serde_json::json!({"kind": "qualification", "qualification": "Air support", "reason": "Pilot"}),
        )
        .await?;

    let exam_service = ExamService::new(&test.db);
    let exam = exam_service.create(exam_input(100)).await.unwrap();

    let first = exam_service
        .start_session(member.id, exam.id, Some(application.id))
        .await
        .unwrap();
    let failed = exam_service
        .submit(member.id, first.id, vec![0, 0])
        .await
        .unwrap();
    assert!(!failed.passed);

    let retake = exam_service
        .start_session(member.id, exam.id, Some(application.id))
        .await;
    assert!(matches!(retake, Err(Error::Validation(_))));

    ApplicationService::new(&test.db)
        .advance(
            &admin,
            application.id,
            ApplicationStatus::TestRequired,
            Some("One more try".to_string()),
        )
        .await
        .unwrap();

    let second = exam_service
        .start_session(member.id, exam.id, Some(application.id))
        .await
        .unwrap();
    let passed = exam_service
        .submit(member.id, second.id, vec![1, 0])
        .await
        .unwrap();
    assert!(passed.passed);

    let stored = entity::prelude::Application::find_by_id(application.id)
        .one(&test.db)
        .await?
        .unwrap();
    assert_eq!(stored.status, ApplicationStatus::Resolved);

    let history: Vec<crate::model::application::StatusChange> =
        serde_json::from_value(stored.status_history)?;
    let steps: Vec<_> = history.iter().map(|change| change.to).collect();
    assert_eq!(
        steps,
        vec![
            ApplicationStatus::TestFailed,
            ApplicationStatus::TestRequired,
            ApplicationStatus::Resolved
        ]
    );
    assert_eq!(exam_service.list_results(member.id).await.unwrap().len(), 2);

    Ok(())
}

/// Expect Conflict instead of a database error when a result for the session was stored first
#[tokio::test]
async fn concurrent_result_is_conflict() -> Result<(), TestError> {
    let test = setup().await?;
    let member = test.user().insert_member("auth|1", None).await?;

    let exam_service = ExamService::new(&test.db);
    let exam = exam_service.create(exam_input(50)).await.unwrap();
    let session = exam_service
        .start_session(member.id, exam.id, None)
        .await
        .unwrap();

    entity::exam_result::ActiveModel {
        session_id: ActiveValue::Set(session.id),
        exam_id: ActiveValue::Set(exam.id),
        user_id: ActiveValue::Set(member.id),
        score: ActiveValue::Set(100),
        passed: ActiveValue::Set(true),
        created_at: ActiveValue::Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(&test.db)
    .await?;

    let result = exam_service.submit(member.id, session.id, vec![1, 0]).await;
    assert!(matches!(result, Err(Error::Conflict(_))));

    let stored = entity::prelude::ExamSession::find_by_id(session.id)
        .one(&test.db)
        .await?
        .unwrap();
    assert!(stored.submitted_at.is_none());

    Ok(())
}
