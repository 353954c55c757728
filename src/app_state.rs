use std::sync::Arc;

use reqwest::Client;

use crate::config::AppConfig;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Client for the upstream JSearch API.
    pub http: Client,
}

impl AppState {
    pub fn new(config: AppConfig, http: Client) -> Self {
        Self {
            config: Arc::new(config),
            http,
        }
    }
}
