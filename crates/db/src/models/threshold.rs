//! Threshold setting model. Settings are append-only; the newest one is in force.

use iotwatch_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `threshold_settings` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ThresholdSetting {
    pub id: DbId,
    pub value: f64,
    /// Free-form note, at most 180 characters.
    pub note: Option<String>,
    pub created_at: Timestamp,
    /// Author of the setting; `None` for rows written before accounts existed
    /// or whose author was removed.
    pub user_id: Option<DbId>,
}

/// DTO for storing a new threshold. `note` must already be truncated.
#[derive(Debug, Clone)]
pub struct CreateThreshold {
    pub value: f64,
    pub note: Option<String>,
    pub user_id: Option<DbId>,
}

/// Restricts threshold listings. The default lists every user's settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThresholdFilter {
    /// Only settings authored by this user.
    pub user_id: Option<DbId>,
}
