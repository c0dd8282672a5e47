//! Request extractors whose rejections render through [`Error`].
//!
//! axum's own `Json`, `Query` and `Path` reject with plain-text bodies and 4xx codes of their
//! choosing. These wrappers route every rejection into [`Error::Validation`] so a malformed
//! request gets a 400 with the usual `{"error": "..."}` body.

use axum::{
    extract::{FromRequest, FromRequestParts},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::server::error::Error;

/// JSON request body, also usable as a JSON response
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Query string parameters
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(Error))]
pub struct Query<T>(pub T);

/// Path parameters
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct Path<T>(pub T);
