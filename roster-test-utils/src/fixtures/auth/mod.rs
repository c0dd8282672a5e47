//! Bearer token fixtures.
//!
//! Tokens are HS256 JWTs signed with the context's secret, matching what the external auth
//! provider issues in production.

pub mod factory;

use jsonwebtoken::{encode, EncodingKey, Header};

use crate::{error::TestError, TestContext};

use self::factory::{mock_claims, mock_expired_claims, TestClaims};

impl TestContext {
    pub fn auth(&self) -> AuthFixtures<'_> {
        AuthFixtures { setup: self }
    }
}

pub struct AuthFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> AuthFixtures<'a> {
    /// Sign arbitrary claims with the test secret.
    pub fn sign(&self, claims: &TestClaims) -> Result<String, TestError> {
        Ok(encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(self.setup.jwt_secret.as_bytes()),
        )?)
    }

    /// Valid token for the given auth provider subject.
    pub fn token_for(&self, auth_id: &str) -> Result<String, TestError> {
        self.sign(&mock_claims(auth_id))
    }

    /// Token for the given subject that expired an hour ago.
    pub fn expired_token_for(&self, auth_id: &str) -> Result<String, TestError> {
        self.sign(&mock_expired_claims(auth_id))
    }
}
