//! Factory functions for auth provider claims.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constant::TEST_EMAIL;

/// Claims in the shape the auth provider issues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestClaims {
    pub sub: String,
    pub email: String,
    pub exp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

/// Claims valid for 15 minutes.
pub fn mock_claims(sub: &str) -> TestClaims {
    TestClaims {
        sub: sub.to_string(),
        email: TEST_EMAIL.to_string(),
        exp: (Utc::now() + Duration::minutes(15)).timestamp(),
        aud: None,
    }
}

/// Claims that expired an hour ago, well outside the default validation leeway.
pub fn mock_expired_claims(sub: &str) -> TestClaims {
    TestClaims {
        exp: (Utc::now() - Duration::hours(1)).timestamp(),
        ..mock_claims(sub)
    }
}
