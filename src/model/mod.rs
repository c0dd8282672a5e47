//! API data transfer objects.
//!
//! Request and response bodies for every REST endpoint, annotated for OpenAPI generation.

pub mod api;
pub mod application;
pub mod cad;
pub mod character;
pub mod department;
pub mod exam;
pub mod forum;
pub mod notification;
pub mod report;
pub mod scheduler;
pub mod template;
pub mod user;
