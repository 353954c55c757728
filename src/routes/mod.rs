pub mod companies;
pub mod health;
pub mod jobs;
pub mod metrics;

use axum::routing::{any, get};
use axum::Router;

use crate::app_state::AppState;

/// API routes shared by the server binary and the integration tests.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/jobs", any(jobs::proxy_jobs))
        .route("/api/companies", get(companies::list_companies))
        .with_state(state)
}
