pub mod correlation;
pub mod hourly;
pub mod stats;
pub mod summary;
