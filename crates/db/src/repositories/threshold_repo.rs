//! Repository for the `threshold_settings` table.

use async_trait::async_trait;
use iotwatch_core::pagination::RowRange;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::threshold::{CreateThreshold, ThresholdFilter, ThresholdSetting};
use crate::store::ResourceStore;

const COLUMNS: &str = "id, value::float8 AS value, note, created_at, user_id";

/// `$1` is the optional author filter; NULL matches every row.
const FILTER: &str = "($1::BIGINT IS NULL OR user_id = $1)";

pub struct ThresholdRepo {
    pool: PgPool,
}

impl ThresholdRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceStore for ThresholdRepo {
    type Row = ThresholdSetting;
    type Input = CreateThreshold;
    type Filter = ThresholdFilter;

    async fn fetch_range(
        &self,
        filter: &ThresholdFilter,
        range: RowRange,
    ) -> Result<Vec<ThresholdSetting>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM threshold_settings
             WHERE {FILTER}
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, ThresholdSetting>(&query)
            .bind(filter.user_id)
            .bind(range.limit())
            .bind(range.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn count(&self, filter: &ThresholdFilter) -> Result<i64, StoreError> {
        let query = format!("SELECT COUNT(*) FROM threshold_settings WHERE {FILTER}");
        let (count,): (i64,) = sqlx::query_as(&query)
            .bind(filter.user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn insert(&self, input: &CreateThreshold) -> Result<ThresholdSetting, StoreError> {
        let query = format!(
            "INSERT INTO threshold_settings (value, note, user_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ThresholdSetting>(&query)
            .bind(input.value)
            .bind(&input.note)
            .bind(input.user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }
}
