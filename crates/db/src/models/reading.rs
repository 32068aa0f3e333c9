//! Sensor reading model. Readings are append-only.

use iotwatch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sensor_readings` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct SensorReading {
    pub id: DbId,
    pub temperature: f64,
    /// Threshold in force when the reading was taken, if the device sent one.
    pub threshold_value: Option<f64>,
    pub recorded_at: Timestamp,
}

/// DTO for recording a new reading. `temperature` must be a JSON number.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReading {
    pub temperature: f64,
    #[serde(default)]
    pub threshold_value: Option<f64>,
}
