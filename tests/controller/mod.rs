//! Handler tests.
//!
//! Handlers are called directly with their extractors, then the response status and body are
//! checked.

mod application;
mod auth;
mod cad;
mod scheduler;
mod user;

use axum::{body::to_bytes, response::Response};
use roster_test_utils::prelude::*;
use serde::de::DeserializeOwned;

use crate::util::TestContextExt;

/// Deserializes a handler response's JSON body
async fn json_body<T: DeserializeOwned>(resp: Response) -> T {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
