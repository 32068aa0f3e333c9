pub mod auth;
pub mod health;
pub mod readings;
pub mod thresholds;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                 register (public)
/// /auth/login                    login (public)
/// /auth/verify                   current user (requires auth)
///
/// /readings                      list, create (public)
/// /readings/latest               newest reading (public)
///
/// /thresholds                    list, create (requires auth)
/// /thresholds/latest             newest threshold (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/readings", readings::router())
        .nest("/thresholds", thresholds::router())
}
