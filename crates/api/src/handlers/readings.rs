//! Handlers for `/readings`. Readings are public: no token is required.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use iotwatch_core::pagination::Page;
use iotwatch_db::{list_page, ResourceStore};
use iotwatch_db::models::reading::{CreateReading, SensorReading};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::query::ListParams;
use crate::state::AppState;

/// GET /api/readings?page=&pageSize=
///
/// Newest-first page of sensor readings.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Page<SensorReading>>> {
    let page = list_page(state.stores.readings.as_ref(), &(), params.page_request()).await?;
    Ok(Json(page))
}

/// GET /api/readings/latest
///
/// The newest reading, or `null` when none has been recorded.
pub async fn latest(State(state): State<AppState>) -> AppResult<Json<Option<SensorReading>>> {
    let reading = state.stores.readings.latest(&()).await?;
    Ok(Json(reading))
}

/// POST /api/readings
///
/// Record a reading. `temperature` must be a JSON number; `threshold_value`
/// may be a number or omitted.
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateReading>,
) -> AppResult<(StatusCode, Json<SensorReading>)> {
    let reading = state.stores.readings.insert(&input).await?;
    tracing::info!(reading_id = reading.id, temperature = reading.temperature, "Reading recorded");
    Ok((StatusCode::CREATED, Json(reading)))
}
