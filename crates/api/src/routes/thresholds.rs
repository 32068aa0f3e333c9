//! Route definitions for the `/thresholds` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::thresholds;
use crate::state::AppState;

/// Routes mounted at `/thresholds`. All require a bearer token.
///
/// ```text
/// GET  /        -> list
/// POST /        -> create
/// GET  /latest  -> latest
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(thresholds::list).post(thresholds::create))
        .route("/latest", get(thresholds::latest))
}
