//! Argon2id password hashing and verification.
//!
//! All password hashes use the Argon2id variant with the library's fixed
//! default cost parameters and a cryptographically random salt generated via
//! [`OsRng`]. The PHC string format is used for storage so that algorithm
//! parameters and salt are embedded in the hash itself.
//!
//! Hashing is CPU-bound. [`PasswordHasher`] runs it on tokio's blocking pool
//! behind a semaphore so at most `workers` jobs run at once and request tasks
//! on the async runtime are never stalled.

use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::Argon2;
use iotwatch_core::error::CoreError;
use tokio::sync::Semaphore;

/// Hash a plaintext password using Argon2id with a random salt.
///
/// Returns the PHC-formatted hash string (includes algorithm, params, salt, and hash).
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default(); // Argon2id with default params
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted Argon2id hash.
///
/// Returns `Ok(true)` if the password matches, `Ok(false)` if it does not.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Bounded pool for password hashing work.
///
/// Cheap to clone; clones share the same concurrency limit.
#[derive(Clone)]
pub struct PasswordHasher {
    permits: Arc<Semaphore>,
}

impl PasswordHasher {
    /// Allow at most `workers` hash/verify jobs to run concurrently.
    pub fn new(workers: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    pub async fn hash(&self, password: String) -> Result<String, CoreError> {
        self.run(move || hash_password(&password))
            .await?
            .map_err(|e| CoreError::Internal(format!("Password hashing error: {e}")))
    }

    /// `Ok(false)` on mismatch; `Err` only when the stored hash is unreadable.
    pub async fn verify(&self, password: String, hash: String) -> Result<bool, CoreError> {
        self.run(move || verify_password(&password, &hash))
            .await?
            .map_err(|e| CoreError::Internal(format!("Password verification error: {e}")))
    }

    async fn run<T, F>(&self, job: F) -> Result<T, CoreError>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        // The permit lives as long as the blocking job, not the caller.
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|_| CoreError::Internal("Password hasher is shut down".into()))?;

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            job()
        })
        .await
        .map_err(|e| CoreError::Internal(format!("Password worker failed: {e}")))
    }
}
