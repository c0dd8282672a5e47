//! Roster: community management backend for role-play departments.
//!
//! `model` holds the request/response types shared with API clients, `server` holds
//! everything that runs in the backend process.

pub mod model;
pub mod server;
