//! Requests through the full router, covering bearer extraction and the OpenAPI document.

use axum::{
    body::{to_bytes, Body},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Request, StatusCode,
    },
    Router,
};
use entity::roster_user::Role;
use roster::server::router;
use roster_test_utils::prelude::*;
use tower::ServiceExt;

use crate::util::TestContextExt;

fn app(test: &TestContext) -> Router {
    router::routes().with_state(test.into_app_state())
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut request = Request::builder().uri(uri);
    if let Some(token) = token {
        request = request.header(AUTHORIZATION, format!("Bearer {}", token));
    }

    request.body(Body::empty()).unwrap()
}

fn post_json(uri: &str, token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {}", token))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn error_message(resp: axum::response::Response) -> Result<String, TestError> {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes)?;

    Ok(body["error"].as_str().unwrap_or_default().to_string())
}

#[tokio::test]
/// Expect the health check to answer without a token
async fn health_is_public() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let resp = app(&test).oneshot(get("/api/health", None)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
/// Expect 401 when no bearer token is sent
async fn missing_token_is_unauthorized() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;

    let resp = app(&test).oneshot(get("/api/auth/me", None)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
/// Expect 401 for a token that expired
async fn expired_token_is_unauthorized() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_user("auth|1", Role::Member)
        .build()
        .await?;
    let token = test.auth().expired_token_for("auth|1")?;

    let resp = app(&test)
        .oneshot(get("/api/auth/me", Some(&token)))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
/// Expect 403 for a valid token whose subject never registered
async fn unregistered_subject_is_forbidden() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let token = test.auth().token_for("auth|unknown")?;

    let resp = app(&test)
        .oneshot(get("/api/auth/me", Some(&token)))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
/// Expect the registered user's profile for a valid token
async fn registered_subject_reaches_handler() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_user("auth|1", Role::Member)
        .build()
        .await?;
    let token = test.auth().token_for("auth|1")?;

    let resp = app(&test)
        .oneshot(get("/api/auth/me", Some(&token)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes)?;
    assert_eq!(body["username"], "user_auth|1");
    assert_eq!(body["role"], "member");

    Ok(())
}

#[tokio::test]
/// Expect 403 with an error body when a member calls an admin route
async fn member_cannot_list_users() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_user("auth|1", Role::Member)
        .build()
        .await?;
    let token = test.auth().token_for("auth|1")?;

    let resp = app(&test)
        .oneshot(get("/api/admin/users", Some(&token)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes)?;
    assert!(body["error"].is_string());

    Ok(())
}

#[tokio::test]
/// Expect the OpenAPI document to declare the bearer scheme and the dispatch routes
async fn openapi_document_is_served() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let resp = app(&test)
        .oneshot(get("/api/docs/openapi.json", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let doc: serde_json::Value = serde_json::from_slice(&bytes)?;
    assert!(doc["components"]["securitySchemes"]["bearer_auth"].is_object());
    assert!(doc["paths"]["/api/cad/calls"].is_object());
    assert!(doc["paths"]["/api/scheduler/run/{job}"].is_object());

    Ok(())
}

#[tokio::test]
/// Expect 400 with an error body when a payload is missing required fields
async fn malformed_payload_is_bad_request() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_application_tables()
        .with_user("auth|1", Role::Member)
        .build()
        .await?;
    let token = test.auth().token_for("auth|1")?;

    let resp = app(&test)
        .oneshot(post_json(
            "/api/applications",
            &token,
            serde_json::json!({"kind": "leave", "reason": "x"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(!error_message(resp).await?.is_empty());

    Ok(())
}

#[tokio::test]
/// Expect 400 with an error body when a path id is not a number
async fn malformed_path_is_bad_request() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_application_tables()
        .with_user("auth|1", Role::Member)
        .build()
        .await?;
    let token = test.auth().token_for("auth|1")?;

    let resp = app(&test)
        .oneshot(get("/api/applications/abc", Some(&token)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(!error_message(resp).await?.is_empty());

    Ok(())
}

#[tokio::test]
/// Expect 400 with an error body when a query parameter cannot be parsed
async fn malformed_query_is_bad_request() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_application_tables()
        .with_user("auth|1", Role::Member)
        .build()
        .await?;
    let token = test.auth().token_for("auth|1")?;

    let resp = app(&test)
        .oneshot(get("/api/applications/eligibility?kind=vacation", Some(&token)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(!error_message(resp).await?.is_empty());

    Ok(())
}
