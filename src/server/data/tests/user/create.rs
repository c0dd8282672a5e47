use super::*;

/// Expect new users to start as active candidates without warnings
#[tokio::test]
async fn creates_candidate() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;

    let user_repo = UserRepository::new(&test.db);
    let result = user_repo.create("auth|1", "jane", "jane@example.com").await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let user = result.unwrap();
    assert_eq!(user.role, Role::Candidate);
    assert_eq!(user.status, entity::roster_user::UserStatus::Active);
    assert_eq!(user.warnings, 0);
    assert_eq!(user.monthly_warnings, 0);

    let found = user_repo.find_by_auth_id("auth|1").await?;
    assert_eq!(found.map(|user| user.id), Some(user.id));

    Ok(())
}

/// Expect an error when the auth provider subject is already registered
#[tokio::test]
async fn fails_for_duplicate_auth_id() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;

    let user_repo = UserRepository::new(&test.db);
    user_repo.create("auth|1", "jane", "jane@example.com").await?;
    let result = user_repo.create("auth|1", "john", "john@example.com").await;

    assert!(result.is_err());

    Ok(())
}

/// Expect Error when required tables haven't been created
#[tokio::test]
async fn fails_when_tables_missing() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let user_repo = UserRepository::new(&test.db);
    let result = user_repo.create("auth|1", "jane", "jane@example.com").await;

    assert!(result.is_err());

    Ok(())
}
