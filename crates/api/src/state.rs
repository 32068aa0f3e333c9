use std::sync::Arc;

use iotwatch_db::Stores;

use crate::auth::password::PasswordHasher;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// Nothing in it is mutated per request.
#[derive(Clone)]
pub struct AppState {
    /// Repositories for users, readings and thresholds.
    pub stores: Stores,
    /// Server configuration (JWT secret, threshold scope, ...).
    pub config: Arc<ServerConfig>,
    /// Bounded pool for Argon2 work.
    pub hasher: PasswordHasher,
}

impl AppState {
    pub fn new(stores: Stores, config: ServerConfig) -> Self {
        let hasher = PasswordHasher::new(config.hash_workers);
        Self {
            stores,
            config: Arc::new(config),
            hasher,
        }
    }
}
