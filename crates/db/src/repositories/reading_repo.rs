//! Repository for the `sensor_readings` table.

use async_trait::async_trait;
use iotwatch_core::pagination::RowRange;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::reading::{CreateReading, SensorReading};
use crate::store::ResourceStore;

/// Numeric columns are stored as NUMERIC and projected as float8 so rows
/// always decode to `f64`.
const COLUMNS: &str = "id, temperature::float8 AS temperature, \
                       threshold_value::float8 AS threshold_value, recorded_at";

pub struct ReadingRepo {
    pool: PgPool,
}

impl ReadingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceStore for ReadingRepo {
    type Row = SensorReading;
    type Input = CreateReading;
    type Filter = ();

    async fn fetch_range(
        &self,
        _filter: &(),
        range: RowRange,
    ) -> Result<Vec<SensorReading>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM sensor_readings
             ORDER BY recorded_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        let rows = sqlx::query_as::<_, SensorReading>(&query)
            .bind(range.limit())
            .bind(range.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn count(&self, _filter: &()) -> Result<i64, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sensor_readings")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn insert(&self, input: &CreateReading) -> Result<SensorReading, StoreError> {
        let query = format!(
            "INSERT INTO sensor_readings (temperature, threshold_value)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, SensorReading>(&query)
            .bind(input.temperature)
            .bind(input.threshold_value)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }
}
