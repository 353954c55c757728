pub mod aggregator;
pub mod board;
pub mod cache;
pub mod categorize;
pub mod filter_store;
pub mod jobs_api;
pub mod store;
