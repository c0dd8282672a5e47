//! Tests for ApplicationService::submit and ApplicationService::eligibility.

use super::*;

/// Expect a pending application with empty history for an eligible member
#[tokio::test]
async fn stores_pending_leave_for_member() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_application_tables()
        .with_department("Police Department")
        .build()
        .await?;
    let member = test.user().insert_member("auth|1", Some(1)).await?;

    let service = ApplicationService::new(&test.db);
    let result = service.submit(&member, leave_from_today(3)).await;

    assert!(result.is_ok());
    let application = result.unwrap();
    assert_eq!(application.kind, ApplicationKind::Leave);
    assert_eq!(application.status, ApplicationStatus::Pending);
    assert_eq!(application.author_id, member.id);
    assert_eq!(application.status_history, serde_json::json!([]));

    Ok(())
}

/// Expect Denied when a candidate applies for leave
#[tokio::test]
async fn denies_leave_for_candidate() -> Result<(), TestError> {
    let test = TestBuilder::new().with_application_tables().build().await?;
    let candidate = test.user().insert_user("auth|1", Role::Candidate).await?;

    let service = ApplicationService::new(&test.db);
    let result = service.submit(&candidate, leave_from_today(3)).await;

    assert!(matches!(
        result,
        Err(Error::ApplicationError(ApplicationError::Denied(_)))
    ));

    Ok(())
}

/// Expect Denied once the stored history exhausts the monthly leave quota
#[tokio::test]
async fn denies_leave_over_monthly_quota() -> Result<(), TestError> {
    let test = TestBuilder::new().with_application_tables().build().await?;
    let member = test.user().insert_member("auth|1", None).await?;

    for offset in [40, 50] {
        let today = Utc::now().date_naive();
        let data = ApplicationData::Leave {
            start_date: today + Duration::days(offset),
            end_date: today + Duration::days(offset + 1),
            reason: "Trip".to_string(),
        };
        test.application()
            .insert_application(
                member.id,
                ApplicationKind::Leave,
                ApplicationStatus::Rejected,
                serde_json::to_value(&data)?,
            )
            .await?;
    }

    let service = ApplicationService::new(&test.db);
    let result = service.submit(&member, leave_from_today(2)).await;

    assert!(matches!(
        result,
        Err(Error::ApplicationError(ApplicationError::Denied(reason))) if reason.contains("Monthly limit")
    ));

    Ok(())
}

/// Expect Denied when the new window touches an approved leave
#[tokio::test]
async fn denies_overlapping_leave() -> Result<(), TestError> {
    let test = TestBuilder::new().with_application_tables().build().await?;
    let member = test.user().insert_member("auth|1", None).await?;

    let existing = leave_from_today(5);
    test.application()
        .insert_application_at(
            member.id,
            ApplicationKind::Leave,
            ApplicationStatus::Approved,
            serde_json::to_value(&existing)?,
            Utc::now().naive_utc() - Duration::days(62),
        )
        .await?;

    let today = Utc::now().date_naive();
    let overlapping = ApplicationData::Leave {
        start_date: today + Duration::days(5),
        end_date: today + Duration::days(8),
        reason: "Extension".to_string(),
    };

    let service = ApplicationService::new(&test.db);
    let result = service.submit(&member, overlapping).await;

    assert!(matches!(
        result,
        Err(Error::ApplicationError(ApplicationError::Denied(_)))
    ));

    Ok(())
}

/// Expect Validation when the entry targets a department that does not exist
#[tokio::test]
async fn rejects_unknown_department() -> Result<(), TestError> {
    let test = TestBuilder::new().with_application_tables().build().await?;
    let candidate = test.user().insert_user("auth|1", Role::Candidate).await?;

    let service = ApplicationService::new(&test.db);
    let result = service
        .submit(
            &candidate,
            ApplicationData::Entry {
                department_id: 99,
                character_name: "Jane Doe".to_string(),
                motivation: "Serve the city".to_string(),
            },
        )
        .await;

    assert!(matches!(result, Err(Error::Validation(_))));

    Ok(())
}

/// Expect Validation for blank free-text fields
#[tokio::test]
async fn rejects_blank_reason() -> Result<(), TestError> {
    let test = TestBuilder::new().with_application_tables().build().await?;
    let member = test.user().insert_member("auth|1", None).await?;

    let service = ApplicationService::new(&test.db);
    let result = service
        .submit(
            &member,
            ApplicationData::Promotion {
                target_rank: "Sergeant".to_string(),
                reason: "   ".to_string(),
            },
        )
        .await;

    assert!(matches!(result, Err(Error::Validation(_))));

    Ok(())
}

/// Expect eligibility to report the promotion cooldown without storing anything
#[tokio::test]
async fn eligibility_reports_cooldown() -> Result<(), TestError> {
    let test = TestBuilder::new().with_application_tables().build().await?;
    let member = test.user().insert_member("auth|1", None).await?;

    test.application()
        .insert_application(
            member.id,
            ApplicationKind::Promotion,
            ApplicationStatus::Rejected,
            serde_json::json!({"kind": "promotion", "target_rank": "Sergeant", "reason": "Time served"}),
        )
        .await?;

    let service = ApplicationService::new(&test.db);
    let promotion = service
        .eligibility(&member, ApplicationKind::Promotion)
        .await
        .unwrap();
    let qualification = service
        .eligibility(&member, ApplicationKind::Qualification)
        .await
        .unwrap();

    assert!(!promotion.is_allowed());
    assert!(qualification.is_allowed());
    assert_eq!(
        entity::prelude::Application::find().all(&test.db).await?.len(),
        1
    );

    Ok(())
}

/// Expect Denied for a joint application while another joint position is held
#[tokio::test]
async fn denies_second_joint_position() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_application_tables()
        .with_department("Police Department")
        .with_department("Fire Department")
        .with_department("Medical Services")
        .build()
        .await?;
    let member = test.user().insert_member("auth|1", Some(1)).await?;
    let member = test.user().set_secondary_department(member, Some(2)).await?;

    let service = ApplicationService::new(&test.db);
    let result = service
        .submit(
            &member,
            ApplicationData::JointSecondary {
                secondary_department_id: 3,
                reason: "Cover night shifts".to_string(),
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(Error::ApplicationError(ApplicationError::Denied(_)))
    ));

    Ok(())
}
