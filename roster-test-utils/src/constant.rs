//! Test configuration constants for auth token setup.
//!
//! These values are placeholders for testing purposes and never real credentials.

/// Shared HS256 secret used to sign and validate test bearer tokens.
pub static TEST_JWT_SECRET: &str = "roster-test-jwt-secret";

/// Email used for test tokens when none is provided.
pub static TEST_EMAIL: &str = "member@example.com";
