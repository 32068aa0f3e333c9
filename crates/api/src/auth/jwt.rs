//! Session token issuance and verification.
//!
//! Tokens are HS256-signed JWTs carrying a [`Claims`] payload. They are
//! stateless: nothing is stored server-side and there is no revocation list,
//! so a token stays valid until it expires.

use std::fmt;

use iotwatch_core::error::AuthError;
use iotwatch_core::types::DbId;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::{non_empty, parse_or, ConfigError};

/// Default token lifetime in days.
pub const DEFAULT_TTL_DAYS: i64 = 7;

/// Claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// The user's internal database id.
    #[serde(rename = "userId")]
    pub user_id: DbId,
    pub email: String,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Configuration for token generation and validation.
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in days.
    pub ttl_days: i64,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("ttl_days", &self.ttl_days)
            .finish()
    }
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, ttl_days: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl_days,
        }
    }

    /// Load JWT configuration.
    ///
    /// | Env Var        | Required | Default |
    /// |----------------|----------|---------|
    /// | `JWT_SECRET`   | **yes**  | --      |
    /// | `JWT_TTL_DAYS` | no       | `7`     |
    ///
    /// There is no fallback secret: an unset or blank `JWT_SECRET` is an error.
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = non_empty(lookup, "JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let ttl_days = parse_or(lookup, "JWT_TTL_DAYS", DEFAULT_TTL_DAYS)?;
        if ttl_days < 1 {
            return Err(ConfigError::Invalid {
                var: "JWT_TTL_DAYS",
                value: ttl_days.to_string(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(Self::new(secret, ttl_days))
    }
}

/// Issue an HS256 token for the given user, valid for `config.ttl_days`.
pub fn issue_token(
    user_id: DbId,
    email: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        user_id,
        email: email.to_string(),
        iat: now,
        exp: now + config.ttl_days * 24 * 60 * 60,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate a token's signature and expiry and return its [`Claims`].
///
/// Fails with exactly one of [`AuthError::MalformedToken`],
/// [`AuthError::InvalidSignature`] or [`AuthError::Expired`].
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<Claims, AuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::MalformedToken,
    })
}
