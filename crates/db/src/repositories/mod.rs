//! PostgreSQL implementations of the store traits.

pub mod reading_repo;
pub mod threshold_repo;
pub mod user_repo;

pub use reading_repo::ReadingRepo;
pub use threshold_repo::ThresholdRepo;
pub use user_repo::UserRepo;
