use super::*;

/// Expect a user to mark their own notification as read
#[tokio::test]
async fn marks_own_notification() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let member = test.user().insert_member("auth|1", None).await?;

    let notification_repo = NotificationRepository::new(&test.db);
    let notification = notification_repo
        .create(member.id, "warning", "Warning issued", "Be nice")
        .await?;
    assert!(!notification.read);

    let result = notification_repo.mark_read(notification.id, member.id).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert!(result.unwrap().unwrap().read);

    Ok(())
}

/// Expect None when the notification belongs to somebody else
#[tokio::test]
async fn ignores_foreign_notification() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let owner = test.user().insert_member("auth|1", None).await?;
    let other = test.user().insert_member("auth|2", None).await?;

    let notification_repo = NotificationRepository::new(&test.db);
    let notification = notification_repo
        .create(owner.id, "warning", "Warning issued", "Be nice")
        .await?;

    let result = notification_repo.mark_read(notification.id, other.id).await?;

    assert!(result.is_none());

    Ok(())
}

/// Expect mark_all_read to count only previously unread notifications of that user
#[tokio::test]
async fn marks_all_unread() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let owner = test.user().insert_member("auth|1", None).await?;
    let other = test.user().insert_member("auth|2", None).await?;

    let notification_repo = NotificationRepository::new(&test.db);
    let first = notification_repo
        .create(owner.id, "info", "First", "One")
        .await?;
    notification_repo
        .create(owner.id, "info", "Second", "Two")
        .await?;
    notification_repo
        .create(other.id, "info", "Other", "Three")
        .await?;
    notification_repo.mark_read(first.id, owner.id).await?;

    let updated = notification_repo.mark_all_read(owner.id).await?;

    assert_eq!(updated, 1);
    let others = notification_repo.list_by_user(other.id).await?;
    assert!(others.iter().all(|notification| !notification.read));

    Ok(())
}
