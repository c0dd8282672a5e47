use super::*;

/// Expect monthly counters zeroed while lifetime counters are kept
#[tokio::test]
async fn zeroes_monthly_counters_only() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_user("auth|clean", Role::Member)
        .build()
        .await?;
    let warned = test.user().insert_member("auth|warned", None).await?;

    let user_repo = UserRepository::new(&test.db);
    user_repo.add_warning(warned.id).await?;

    let result = user_repo.reset_monthly_warnings().await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert_eq!(result.unwrap(), 1);

    let reloaded = test.user().reload(warned.id).await?.unwrap();
    assert_eq!(reloaded.monthly_warnings, 0);
    assert_eq!(reloaded.warnings, 1);

    Ok(())
}

/// Expect zero affected rows when nobody has monthly warnings
#[tokio::test]
async fn affects_nothing_when_clean() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_user("auth|1", Role::Member)
        .build()
        .await?;

    let user_repo = UserRepository::new(&test.db);
    let result = user_repo.reset_monthly_warnings().await;

    assert_eq!(result?, 0);

    Ok(())
}
