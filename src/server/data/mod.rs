//! Data access layer repositories.
//!
//! Each repository wraps one table (or a small group of tables owned by one feature) and is
//! generic over [`sea_orm::ConnectionTrait`], so the same repository runs against the pooled
//! connection or inside a transaction.

pub mod application;
pub mod cad;
pub mod character;
pub mod complaint;
pub mod department;
pub mod exam;
pub mod forum;
pub mod notification;
pub mod report;
pub mod scheduler_run;
pub mod support;
pub mod template;
pub mod user;

#[cfg(test)]
mod tests;
