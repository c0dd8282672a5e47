//! Helpers shared by controllers.

pub mod auth;
pub mod extract;
