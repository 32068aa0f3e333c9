//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing on a bounded blocking pool.
//! - [`jwt`] -- Stateless session tokens: issuance and verification.

pub mod jwt;
pub mod password;
