use super::*;

/// Expect both counters to increase by one
#[tokio::test]
async fn increments_both_counters() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let member = test.user().insert_member("auth|1", None).await?;

    let user_repo = UserRepository::new(&test.db);
    user_repo.add_warning(member.id).await?;
    let result = user_repo.add_warning(member.id).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let updated = result.unwrap().unwrap();
    assert_eq!(updated.warnings, 2);
    assert_eq!(updated.monthly_warnings, 2);

    Ok(())
}

/// Expect None for a user that does not exist
#[tokio::test]
async fn returns_none_for_missing_user() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;

    let user_repo = UserRepository::new(&test.db);
    let result = user_repo.add_warning(42).await;

    assert!(result.is_ok());
    assert!(result.unwrap().is_none());

    Ok(())
}
