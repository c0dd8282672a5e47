use axum::{extract::State, http::StatusCode, response::IntoResponse};
use entity::roster_user::Role;
use roster::{
    model::user::{RegisterDto, UserDto},
    server::controller::{
        auth::{me, register},
        util::{
            auth::{AuthClaims, AuthUser},
            extract::Json,
        },
    },
};

use super::*;

#[tokio::test]
/// Expect 201 with a candidate account for a fresh token subject
async fn register_creates_candidate() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let state = test.into_app_state();
    let claims = state.auth.verify(&test.auth().token_for("auth|1")?).unwrap();

    let result = register(
        State(state),
        AuthClaims(claims),
        Json(RegisterDto {
            username: "  Officer_Doe ".to_string(),
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let user: UserDto = json_body(resp).await;
    assert_eq!(user.username, "Officer_Doe");
    assert_eq!(user.role, Role::Candidate);

    Ok(())
}

#[tokio::test]
/// Expect 409 when the token subject already has an account
async fn register_twice_conflicts() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_user("auth|1", Role::Member)
        .build()
        .await?;
    let state = test.into_app_state();
    let claims = state.auth.verify(&test.auth().token_for("auth|1")?).unwrap();

    let result = register(
        State(state),
        AuthClaims(claims),
        Json(RegisterDto {
            username: "someone_else".to_string(),
        }),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    Ok(())
}

#[tokio::test]
/// Expect 400 for a blank username
async fn register_rejects_blank_username() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let state = test.into_app_state();
    let claims = state.auth.verify(&test.auth().token_for("auth|1")?).unwrap();

    let result = register(
        State(state),
        AuthClaims(claims),
        Json(RegisterDto {
            username: "   ".to_string(),
        }),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
/// Expect 200 with the authenticated user's profile
async fn me_returns_current_user() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let user = test.user().insert_user("auth|7", Role::Supervisor).await?;

    let resp = me(AuthUser(user.clone())).await.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: UserDto = json_body(resp).await;
    assert_eq!(body.id, user.id);
    assert_eq!(body.role, Role::Supervisor);

    Ok(())
}
