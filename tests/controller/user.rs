use axum::{extract::State, http::StatusCode, response::IntoResponse};
use entity::roster_user::Role;
use roster::{
    model::user::{UpdateRoleDto, UserDto, WarningDto},
    server::controller::{
        user::{add_warning, list_users, update_role},
        util::{
            auth::AuthUser,
            extract::{Json, Path},
        },
    },
};

use super::*;

#[tokio::test]
/// Expect 403 for a supervisor on an admin-only route
async fn list_users_requires_admin() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let supervisor = test.user().insert_user("auth|1", Role::Supervisor).await?;

    let result = list_users(State(test.into_app_state()), AuthUser(supervisor)).await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
/// Expect every registered user in the admin listing
async fn list_users_returns_all() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_user("auth|1", Role::Admin)
        .with_user("auth|2", Role::Candidate)
        .with_user("auth|3", Role::Member)
        .build()
        .await?;
    let admin = test.user().reload(1).await?.unwrap();

    let resp = list_users(State(test.into_app_state()), AuthUser(admin))
        .await
        .unwrap()
        .into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let users: Vec<UserDto> = json_body(resp).await;
    assert_eq!(users.len(), 3);

    Ok(())
}

#[tokio::test]
/// Expect the new role to be stored
async fn update_role_promotes_user() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let admin = test.user().insert_user("auth|1", Role::Admin).await?;
    let candidate = test.user().insert_user("auth|2", Role::Candidate).await?;

    let resp = update_role(
        State(test.into_app_state()),
        AuthUser(admin),
        Path(candidate.id),
        Json(UpdateRoleDto { role: Role::Member }),
    )
    .await
    .unwrap()
    .into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let stored = test.user().reload(candidate.id).await?.unwrap();
    assert_eq!(stored.role, Role::Member);

    Ok(())
}

#[tokio::test]
/// Expect 404 when warning a user that does not exist
async fn add_warning_unknown_user() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let admin = test.user().insert_user("auth|1", Role::Admin).await?;

    let result = add_warning(
        State(test.into_app_state()),
        AuthUser(admin),
        Path(42),
        Json(WarningDto {
            reason: "Powergaming".to_string(),
        }),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
/// Expect both warning counters to increase
async fn add_warning_increments_counters() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let admin = test.user().insert_user("auth|1", Role::Admin).await?;
    let member = test.user().insert_member("auth|2", None).await?;

    let resp = add_warning(
        State(test.into_app_state()),
        AuthUser(admin),
        Path(member.id),
        Json(WarningDto {
            reason: "Powergaming".to_string(),
        }),
    )
    .await
    .unwrap()
    .into_response();

    let warned: UserDto = json_body(resp).await;
    assert_eq!(warned.warnings, member.warnings + 1);
    assert_eq!(warned.monthly_warnings, member.monthly_warnings + 1);

    Ok(())
}
