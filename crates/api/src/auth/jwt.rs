//! Bearer tokens for producers and vocals.
//!
//! Tokens are HS256 JWTs carrying [`Claims`]. `sub` is an id in the
//! `producers` or `vocals` table; `role` says which one.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use track1_core::types::DbId;
use uuid::Uuid;

const DEFAULT_EXPIRY_MINS: i64 = 15;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: DbId,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl Claims {
    /// Claims for `account_id` acting as `role`, valid for `ttl_mins`.
    pub fn new(account_id: DbId, role: &str, ttl_mins: i64) -> Self {
        let issued = Utc::now();
        Self {
            sub: account_id,
            role: role.to_string(),
            exp: (issued + Duration::minutes(ttl_mins)).timestamp(),
            iat: issued.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}

/// Signing secret and token lifetime.
///
/// `JWT_SECRET` is required; `JWT_ACCESS_EXPIRY_MINS` defaults to 15.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .expect("JWT_SECRET must be set to a non-empty value");

        let access_token_expiry_mins = match std::env::var("JWT_ACCESS_EXPIRY_MINS") {
            Ok(raw) => raw
                .parse()
                .expect("JWT_ACCESS_EXPIRY_MINS must be a whole number of minutes"),
            Err(_) => DEFAULT_EXPIRY_MINS,
        };

        Self {
            secret,
            access_token_expiry_mins,
        }
    }

    fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(self.secret.as_bytes())
    }

    fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.secret.as_bytes())
    }
}

/// Sign a token for `account_id` in `role`.
pub fn issue_token(
    account_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims::new(account_id, role, config.access_token_expiry_mins);
    encode(&Header::default(), &claims, &config.encoding_key())
}

/// Verify signature and expiry, returning the claims.
pub fn decode_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(token, &config.decoding_key(), &Validation::default())
        .map(|data| data.claims)
}
