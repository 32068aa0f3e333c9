//! Bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use iotwatch_core::error::{AuthError, CoreError};
use iotwatch_core::types::DbId;

use crate::auth::jwt::verify_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated identity extracted from an `Authorization: Bearer <token>`
/// header.
///
/// Add it as a handler parameter to require authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// The identity lives only as long as the request; nothing is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// The user's internal database id (from the token's `userId` claim).
    pub user_id: DbId,
    pub email: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::NoToken)
            .map_err(CoreError::from)?;

        let token = bearer_token(header.to_str().ok()).map_err(CoreError::from)?;
        let claims = verify_token(token, &state.config.jwt).map_err(CoreError::from)?;

        Ok(AuthUser {
            user_id: claims.user_id,
            email: claims.email,
        })
    }
}

/// Split an `Authorization` value of exactly the form `Bearer <token>`.
fn bearer_token(value: Option<&str>) -> Result<&str, AuthError> {
    let mut parts = value.ok_or(AuthError::BadFormat)?.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Ok(token),
        _ => Err(AuthError::BadFormat),
    }
}
