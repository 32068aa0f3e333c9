//! Process-local stores implementing the same traits as the PostgreSQL
//! repositories.
//!
//! Rows are kept in insertion order; ids are assigned sequentially, so
//! reverse insertion order is the newest-first order.

use async_trait::async_trait;
use chrono::Utc;
use iotwatch_core::pagination::RowRange;
use iotwatch_core::types::DbId;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::reading::{CreateReading, SensorReading};
use crate::models::threshold::{CreateThreshold, ThresholdFilter, ThresholdSetting};
use crate::models::user::{CreateUser, User};
use crate::store::{ResourceStore, UserStore};

/// Name reported for email collisions, matching the PostgreSQL schema.
const USERS_EMAIL_CONSTRAINT: &str = "uq_users_email";

#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, input: &CreateUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == input.email) {
            return Err(StoreError::UniqueViolation {
                constraint: USERS_EMAIL_CONSTRAINT.to_string(),
            });
        }
        let user = User {
            id: next_id(users.len()),
            email: input.email.clone(),
            name: input.name.clone(),
            password_hash: input.password_hash.clone(),
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }
}

/// Append-only table of rows of type `R`.
pub struct MemoryTable<R> {
    rows: RwLock<Vec<R>>,
}

impl<R> Default for MemoryTable<R> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl<R: Clone> MemoryTable<R> {
    async fn select(&self, matches: impl Fn(&R) -> bool, range: RowRange) -> Vec<R> {
        let rows = self.rows.read().await;
        rows.iter()
            .rev()
            .filter(|&row| matches(row))
            .skip(to_usize(range.offset()))
            .take(to_usize(range.limit()))
            .cloned()
            .collect()
    }

    async fn count_matching(&self, matches: impl Fn(&R) -> bool) -> i64 {
        let rows = self.rows.read().await;
        rows.iter().filter(|&row| matches(row)).count() as i64
    }

    async fn append(&self, build: impl FnOnce(DbId) -> R) -> R {
        let mut rows = self.rows.write().await;
        let row = build(next_id(rows.len()));
        rows.push(row.clone());
        row
    }
}

#[async_trait]
impl ResourceStore for MemoryTable<SensorReading> {
    type Row = SensorReading;
    type Input = CreateReading;
    type Filter = ();

    async fn fetch_range(
        &self,
        _filter: &(),
        range: RowRange,
    ) -> Result<Vec<SensorReading>, StoreError> {
        Ok(self.select(|_| true, range).await)
    }

    async fn count(&self, _filter: &()) -> Result<i64, StoreError> {
        Ok(self.count_matching(|_| true).await)
    }

    async fn insert(&self, input: &CreateReading) -> Result<SensorReading, StoreError> {
        let row = self
            .append(|id| SensorReading {
                id,
                temperature: input.temperature,
                threshold_value: input.threshold_value,
                recorded_at: Utc::now(),
            })
            .await;
        Ok(row)
    }
}

#[async_trait]
impl ResourceStore for MemoryTable<ThresholdSetting> {
    type Row = ThresholdSetting;
    type Input = CreateThreshold;
    type Filter = ThresholdFilter;

    async fn fetch_range(
        &self,
        filter: &ThresholdFilter,
        range: RowRange,
    ) -> Result<Vec<ThresholdSetting>, StoreError> {
        let filter = *filter;
        Ok(self.select(move |row| owned_by(filter, row), range).await)
    }

    async fn count(&self, filter: &ThresholdFilter) -> Result<i64, StoreError> {
        let filter = *filter;
        Ok(self.count_matching(move |row| owned_by(filter, row)).await)
    }

    async fn insert(&self, input: &CreateThreshold) -> Result<ThresholdSetting, StoreError> {
        let row = self
            .append(|id| ThresholdSetting {
                id,
                value: input.value,
                note: input.note.clone(),
                created_at: Utc::now(),
                user_id: input.user_id,
            })
            .await;
        Ok(row)
    }
}

fn owned_by(filter: ThresholdFilter, row: &ThresholdSetting) -> bool {
    filter.user_id.is_none() || filter.user_id == row.user_id
}

fn next_id(len: usize) -> DbId {
    len as DbId + 1
}

fn to_usize(value: i64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use iotwatch_core::pagination::PageRequest;

    use super::*;
    use crate::store::list_page;

    fn reading(temperature: f64) -> CreateReading {
        CreateReading {
            temperature,
            threshold_value: None,
        }
    }

    #[tokio::test]
    async fn readings_are_listed_newest_first() {
        let table = MemoryTable::<SensorReading>::default();
        for t in [20.0, 21.0, 22.0] {
            table.insert(&reading(t)).await.unwrap();
        }

        let page = list_page(&table, &(), PageRequest::new(Some(1), Some(2)))
            .await
            .unwrap();
        let temps: Vec<f64> = page.items.iter().map(|r| r.temperature).collect();
        assert_eq!(temps, vec![22.0, 21.0]);
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn twelve_rows_give_three_pages_with_two_on_the_last() {
        let table = MemoryTable::<SensorReading>::default();
        for t in 0..12 {
            table.insert(&reading(f64::from(t))).await.unwrap();
        }

        let page = list_page(&table, &(), PageRequest::new(Some(3), Some(5)))
            .await
            .unwrap();
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].temperature, 1.0);
        assert_eq!(page.items[1].temperature, 0.0);
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty() {
        let table = MemoryTable::<SensorReading>::default();
        table.insert(&reading(1.0)).await.unwrap();

        let page = list_page(&table, &(), PageRequest::new(Some(7), None))
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.page, 7);
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn threshold_filter_restricts_to_author() {
        let table = MemoryTable::<ThresholdSetting>::default();
        for (value, user_id) in [(10.0, Some(1)), (11.0, Some(2)), (12.0, None)] {
            table
                .insert(&CreateThreshold {
                    value,
                    note: None,
                    user_id,
                })
                .await
                .unwrap();
        }

        let all = ThresholdFilter::default();
        assert_eq!(table.count(&all).await.unwrap(), 3);

        let mine = ThresholdFilter { user_id: Some(2) };
        assert_eq!(table.count(&mine).await.unwrap(), 1);
        let latest = table.latest(&mine).await.unwrap().unwrap();
        assert_eq!(latest.value, 11.0);
    }

    #[tokio::test]
    async fn latest_on_empty_table_is_none() {
        let table = MemoryTable::<ThresholdSetting>::default();
        assert!(table.latest(&ThresholdFilter::default()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_unique_violation() {
        let store = MemoryUserStore::default();
        let input = CreateUser {
            email: "a@x.com".into(),
            name: "Ann".into(),
            password_hash: "hash".into(),
        };
        store.create(&input).await.unwrap();

        let err = store.create(&input).await.unwrap_err();
        assert_matches!(
            err,
            StoreError::UniqueViolation { ref constraint } if constraint == "uq_users_email"
        );
        assert_eq!(store.users.read().await.len(), 1);
    }
}
