//! Route definitions for the `/readings` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::readings;
use crate::state::AppState;

/// Routes mounted at `/readings`.
///
/// ```text
/// GET  /        -> list
/// POST /        -> create
/// GET  /latest  -> latest
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(readings::list).post(readings::create))
        .route("/latest", get(readings::latest))
}
