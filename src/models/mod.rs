pub mod company;
pub mod filter;
pub mod job;
pub mod jsearch;
