use axum::{extract::State, http::StatusCode, response::IntoResponse};
use entity::roster_user::Role;
use roster::{
    model::cad::{AnnouncementDto, CreateAnnouncementDto},
    server::{
        cad::message::EventKind,
        controller::{
            cad::announce,
            util::{auth::AuthUser, extract::Json},
        },
    },
};

use super::*;

#[tokio::test]
/// Expect a supervisor's announcement to be returned and pushed to connected clients
async fn supervisor_broadcasts_announcement() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let supervisor = test.user().insert_user("auth|1", Role::Supervisor).await?;
    let state = test.into_app_state();
    let (_, mut receiver) = state.cad.register().await;

    let resp = announce(
        State(state),
        AuthUser(supervisor.clone()),
        Json(CreateAnnouncementDto {
            message: "All units, radio check".to_string(),
        }),
    )
    .await
    .unwrap()
    .into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let announcement: AnnouncementDto = json_body(resp).await;
    assert_eq!(announcement.message, "All units, radio check");
    assert_eq!(announcement.author_id, supervisor.id);

    let event = receiver.try_recv().unwrap();
    assert_eq!(event.kind, EventKind::Announcement);
    assert_eq!(event.data["message"], "All units, radio check");

    Ok(())
}

#[tokio::test]
/// Expect 403 for a member and no event on the socket
async fn member_cannot_announce() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let member = test.user().insert_member("auth|1", None).await?;
    let state = test.into_app_state();
    let (_, mut receiver) = state.cad.register().await;

    let result = announce(
        State(state),
        AuthUser(member),
        Json(CreateAnnouncementDto {
            message: "Party at the station".to_string(),
        }),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(receiver.try_recv().is_err());

    Ok(())
}
