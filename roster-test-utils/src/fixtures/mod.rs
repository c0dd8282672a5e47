//! Test fixture modules for database records and bearer tokens.
//!
//! - `auth` - signed bearer tokens and claim factories
//! - `user` - Roster users with roles and department assignments
//! - `department` - departments
//! - `application` - applications with arbitrary status, payload and timestamps

pub mod application;
pub mod auth;
pub mod department;
pub mod user;
