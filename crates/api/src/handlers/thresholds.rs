//! Handlers for `/thresholds`. Every route requires a bearer token.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use iotwatch_core::pagination::Page;
use iotwatch_core::validation::truncate_note;
use iotwatch_db::{list_page, ResourceStore};
use iotwatch_db::models::threshold::{CreateThreshold, ThresholdFilter, ThresholdSetting};
use serde::Deserialize;

use crate::config::ThresholdScope;
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::query::ListParams;
use crate::state::AppState;

/// Request body for `POST /thresholds`.
#[derive(Debug, Deserialize)]
pub struct CreateThresholdRequest {
    pub value: f64,
    #[serde(default)]
    pub note: Option<String>,
}

/// GET /api/thresholds?page=&pageSize=
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Page<ThresholdSetting>>> {
    let filter = scope_filter(&state, &auth_user);
    let page = list_page(state.stores.thresholds.as_ref(), &filter, params.page_request()).await?;
    Ok(Json(page))
}

/// GET /api/thresholds/latest
///
/// The threshold currently in force, or `null` when none has been set.
pub async fn latest(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<Option<ThresholdSetting>>> {
    let filter = scope_filter(&state, &auth_user);
    let setting = state.stores.thresholds.latest(&filter).await?;
    Ok(Json(setting))
}

/// POST /api/thresholds
///
/// Store a new threshold authored by the caller. Notes longer than 180
/// characters are truncated.
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(input): AppJson<CreateThresholdRequest>,
) -> AppResult<(StatusCode, Json<ThresholdSetting>)> {
    let create = CreateThreshold {
        value: input.value,
        note: input.note.as_deref().map(truncate_note),
        user_id: Some(auth_user.user_id),
    };
    let setting = state.stores.thresholds.insert(&create).await?;

    tracing::info!(
        threshold_id = setting.id,
        user_id = auth_user.user_id,
        value = setting.value,
        "Threshold set"
    );
    Ok((StatusCode::CREATED, Json(setting)))
}

/// Listing filter implied by the configured [`ThresholdScope`].
fn scope_filter(state: &AppState, auth_user: &AuthUser) -> ThresholdFilter {
    match state.config.threshold_scope {
        ThresholdScope::Global => ThresholdFilter::default(),
        ThresholdScope::PerUser => ThresholdFilter {
            user_id: Some(auth_user.user_id),
        },
    }
}
