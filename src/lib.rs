//! Iowa Dev Jobs
//!
//! Regional tech job board. The library holds the JSearch proxy routes and
//! the client-side aggregation pipeline: upstream search client, keyword
//! categorizer, single-slot listing cache, multi-query aggregator, persisted
//! filter state and the orchestration layer the job board renders from.

pub mod app_state;
pub mod config;
pub mod models;
pub mod routes;
pub mod services;
