//! Service layer for business logic.
//!
//! Services validate requests, apply domain rules and coordinate repositories, opening a
//! transaction where a request writes more than one row. Read paths retry transient database
//! failures through [`retry::RetryContext`].

pub mod application;
pub mod cad;
pub mod character;
pub mod department;
pub mod exam;
pub mod forum;
pub mod notification;
pub mod report;
pub mod retry;
pub mod template;
pub mod user;
