use crate::types::DbId;

/// Domain-level failures shared by the store and HTTP layers.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Email already exists: {email}")]
    EmailExists { email: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] AuthError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Why a request failed authentication.
///
/// Every variant is terminal for the request and maps to HTTP 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No `Authorization` header was sent.
    #[error("No token provided")]
    NoToken,
    /// The header is not exactly `Bearer <token>`.
    #[error("Invalid token format")]
    BadFormat,
    /// The token could not be decoded (bad base64, bad JSON, wrong shape).
    #[error("Invalid token")]
    MalformedToken,
    /// The token decoded but its signature does not match the server secret.
    #[error("Invalid token signature")]
    InvalidSignature,
    /// The token's `exp` claim is in the past.
    #[error("Token expired")]
    Expired,
    /// Email/password pair did not match a user.
    #[error("Invalid email or password")]
    InvalidCredentials,
}

impl AuthError {
    /// Stable machine-readable code used in error response bodies.
    pub fn code(self) -> &'static str {
        match self {
            AuthError::NoToken => "NO_TOKEN",
            AuthError::BadFormat => "BAD_FORMAT",
            AuthError::MalformedToken => "MALFORMED_TOKEN",
            AuthError::InvalidSignature => "INVALID_SIGNATURE",
            AuthError::Expired => "TOKEN_EXPIRED",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
        }
    }
}
