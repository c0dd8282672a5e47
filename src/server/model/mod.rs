//! Server application models and type definitions.
//!
//! Application state shared by every handler, verified bearer token claims, and type aliases
//! for the database models the services pass around.

pub mod app;
pub mod auth;
pub mod db;
