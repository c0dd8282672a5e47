//! Backend process: HTTP API, persistence, dispatch socket and scheduled jobs.

pub mod cad;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
