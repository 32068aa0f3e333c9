pub mod auth;
pub mod readings;
pub mod thresholds;
