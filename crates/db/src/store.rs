//! Repository interfaces the HTTP layer depends on.
//!
//! Each entity is reached through one small trait so the backing technology
//! (PostgreSQL, in-memory) can be swapped without touching handlers.

use std::sync::Arc;

use async_trait::async_trait;
use iotwatch_core::pagination::{Page, PageRequest, RowRange};
use iotwatch_core::types::DbId;

use crate::error::StoreError;
use crate::memory::{MemoryTable, MemoryUserStore};
use crate::models::reading::{CreateReading, SensorReading};
use crate::models::threshold::{CreateThreshold, ThresholdFilter, ThresholdSetting};
use crate::models::user::{CreateUser, User};
use crate::repositories::{ReadingRepo, ThresholdRepo, UserRepo};
use crate::DbPool;

/// Lookup and creation of user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user. Fails with [`StoreError::UniqueViolation`] when the
    /// email is already taken.
    async fn create(&self, input: &CreateUser) -> Result<User, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

/// Append-only, offset-paginated table of timestamped rows.
///
/// Rows are always returned newest first.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    type Row: Send;
    type Input: Send + Sync;
    type Filter: Send + Sync;

    /// Rows `[range.from, range.to]` of the filtered, newest-first ordering.
    async fn fetch_range(
        &self,
        filter: &Self::Filter,
        range: RowRange,
    ) -> Result<Vec<Self::Row>, StoreError>;

    /// Exact number of rows matching `filter`.
    async fn count(&self, filter: &Self::Filter) -> Result<i64, StoreError>;

    /// Persist one row; the store assigns `id` and the timestamp.
    async fn insert(&self, input: &Self::Input) -> Result<Self::Row, StoreError>;

    /// The newest matching row, if any.
    async fn latest(&self, filter: &Self::Filter) -> Result<Option<Self::Row>, StoreError> {
        let rows = self.fetch_range(filter, RowRange { from: 0, to: 0 }).await?;
        Ok(rows.into_iter().next())
    }
}

pub type ReadingStore = dyn ResourceStore<Row = SensorReading, Input = CreateReading, Filter = ()>;

pub type ThresholdStore =
    dyn ResourceStore<Row = ThresholdSetting, Input = CreateThreshold, Filter = ThresholdFilter>;

/// Run one ranged read and one exact count, and wrap them in a [`Page`].
pub async fn list_page<S>(
    store: &S,
    filter: &S::Filter,
    request: PageRequest,
) -> Result<Page<S::Row>, StoreError>
where
    S: ResourceStore + ?Sized,
{
    let (items, total) = tokio::try_join!(
        store.fetch_range(filter, request.range()),
        store.count(filter)
    )?;
    Ok(Page::new(items, request, total))
}

#[derive(Clone)]
enum Backend {
    Postgres(DbPool),
    Memory,
}

/// The full set of stores the service needs, sharing one backend.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub readings: Arc<ReadingStore>,
    pub thresholds: Arc<ThresholdStore>,
    backend: Backend,
}

impl Stores {
    /// Stores backed by PostgreSQL through the given pool.
    pub fn postgres(pool: DbPool) -> Self {
        Self {
            users: Arc::new(UserRepo::new(pool.clone())),
            readings: Arc::new(ReadingRepo::new(pool.clone())),
            thresholds: Arc::new(ThresholdRepo::new(pool.clone())),
            backend: Backend::Postgres(pool),
        }
    }

    /// Process-local stores. Data is lost on restart.
    pub fn memory() -> Self {
        Self {
            users: Arc::new(MemoryUserStore::default()),
            readings: Arc::new(MemoryTable::<SensorReading>::default()),
            thresholds: Arc::new(MemoryTable::<ThresholdSetting>::default()),
            backend: Backend::Memory,
        }
    }

    /// Name of the backend, for logs and the health endpoint.
    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Postgres(_) => "postgres",
            Backend::Memory => "memory",
        }
    }

    pub async fn health_check(&self) -> Result<(), StoreError> {
        match &self.backend {
            Backend::Postgres(pool) => crate::health_check(pool).await.map_err(StoreError::from),
            Backend::Memory => Ok(()),
        }
    }
}
