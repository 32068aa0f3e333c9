pub mod reading;
pub mod threshold;
pub mod user;
