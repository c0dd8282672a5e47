//! Axum handlers for the Roster API.
//!
//! Handlers authenticate through the extractors in [`util::auth`], delegate to a service and
//! map the result to a JSON response. Each one carries a `#[utoipa::path]` for the OpenAPI
//! document assembled in [`crate::server::router`].

pub mod application;
pub mod auth;
pub mod cad;
pub mod character;
pub mod department;
pub mod exam;
pub mod forum;
pub mod health;
pub mod notification;
pub mod report;
pub mod scheduler;
pub mod template;
pub mod user;
pub mod util;
