use std::sync::Arc;

use axum::routing::get;
use metrics_exporter_prometheus::PrometheusBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use iowa_dev_jobs::app_state::AppState;
use iowa_dev_jobs::config::AppConfig;
use iowa_dev_jobs::routes;

#[tokio::main]
async fn main() {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    // Load configuration from environment
    let config = AppConfig::from_env().expect("Failed to load configuration from environment");

    tracing::info!("Initializing iowa-dev-jobs proxy");

    if config.credential().is_none() {
        tracing::warn!("RAPIDAPI_KEY is not set; /api/jobs will answer 500 until it is");
    }

    // Initialize Prometheus metrics recorder
    let prometheus_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    let prometheus_handle = Arc::new(prometheus_handle);
    routes::metrics::describe_metrics();

    let http = reqwest::Client::builder()
        .user_agent(concat!("iowa-dev-jobs-proxy/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to build upstream HTTP client");

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(config, http);

    let app = routes::api_router(state)
        // Prometheus metrics endpoint (separate state)
        .route(
            "/metrics",
            get(routes::metrics::prometheus_metrics).with_state(prometheus_handle),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Proxy listening on {}", bind_addr);

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
