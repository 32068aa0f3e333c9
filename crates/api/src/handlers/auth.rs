//! Handlers for the `/auth` resource (register, login, verify).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use iotwatch_core::error::{AuthError, CoreError};
use iotwatch_core::validation::{validate_password_strength, MIN_PASSWORD_LENGTH};
use iotwatch_db::models::user::{CreateUser, User, UserResponse};
use iotwatch_db::{StoreError, UserStore};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::auth::jwt::issue_token;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
}

impl RegisterRequest {
    fn validate(&self) -> Result<(), CoreError> {
        let required = [&self.email, &self.password, &self.name];
        if required.iter().any(|v| v.trim().is_empty()) {
            return Err(CoreError::Validation(
                "Email, password, and name are required".into(),
            ));
        }
        if !self.email.validate_email() {
            return Err(CoreError::Validation("Email is not a valid address".into()));
        }
        validate_password_strength(&self.password, MIN_PASSWORD_LENGTH)
            .map_err(CoreError::Validation)
    }
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Response for `GET /auth/verify`.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create an account and return a session token for it.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    input.validate()?;

    // 1. Reject a taken email before paying for a hash.
    if state.stores.users.find_by_email(&input.email).await?.is_some() {
        return Err(email_exists(&input.email));
    }

    // 2. Hash off the async runtime.
    let password_hash = state.hasher.hash(input.password).await?;

    // 3. Insert; the store's unique constraint catches a concurrent duplicate.
    let create = CreateUser {
        email: input.email,
        name: input.name,
        password_hash,
    };
    let user = match state.stores.users.create(&create).await {
        Ok(user) => user,
        Err(StoreError::UniqueViolation { .. }) => return Err(email_exists(&create.email)),
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = user.id, "User registered");

    let response = auth_response(&state, &user)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/auth/login
///
/// Authenticate with email + password. Returns a session token.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    if input.email.is_empty() || input.password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Email and password are required".into(),
        )));
    }

    // 1. Find user by email.
    let user = state
        .stores
        .users
        .find_by_email(&input.email)
        .await?
        .ok_or(CoreError::Unauthorized(AuthError::InvalidCredentials))?;

    // 2. Verify password.
    let password_valid = state
        .hasher
        .verify(input.password, user.password_hash.clone())
        .await?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            AuthError::InvalidCredentials,
        )));
    }

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(auth_response(&state, &user)?))
}

/// GET /api/auth/verify
///
/// Return the account behind a valid bearer token.
pub async fn verify(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<VerifyResponse>> {
    let user = state
        .stores
        .users
        .find_by_id(auth_user.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        })?;

    Ok(Json(VerifyResponse {
        user: UserResponse::from(&user),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn email_exists(email: &str) -> AppError {
    AppError::Core(CoreError::EmailExists {
        email: email.to_string(),
    })
}

/// Issue a token for `user` and build the response body.
fn auth_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let token = issue_token(user.id, &user.email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthResponse {
        token,
        user: UserResponse::from(user),
    })
}
