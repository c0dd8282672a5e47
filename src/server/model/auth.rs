use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::server::error::auth::AuthError;

/// Claims carried by bearer tokens issued by the auth provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Provider user ID, stored as `roster_user.auth_id`
    pub sub: String,
    #[serde(default)]
    pub email: String,
    pub exp: i64,
    #[serde(default)]
    pub aud: Option<String>,
}

/// Key material and validation rules for bearer tokens.
#[derive(Clone)]
pub struct AuthKeys {
    decoding: DecodingKey,
    validation: Validation,
}

impl AuthKeys {
    /// HS256 keys for the shared provider secret.
    ///
    /// The `aud` claim is only checked when an audience is configured.
    pub fn new(secret: &str, audience: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        match audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Self {
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verifies signature and expiry, returning the token's claims
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(AuthError::InvalidToken)
    }
}
