/// Failure reported by a backing store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A write collided with a unique constraint (PostgreSQL `23505`).
    #[error("Duplicate value violates unique constraint: {constraint}")]
    UniqueViolation { constraint: String },

    /// Any other database failure. Opaque to callers.
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                return StoreError::UniqueViolation { constraint };
            }
        }
        StoreError::Database(err)
    }
}
