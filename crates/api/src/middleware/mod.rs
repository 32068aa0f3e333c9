//! Request guards.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated identity from a Bearer token.

pub mod auth;
