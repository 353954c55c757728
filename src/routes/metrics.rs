use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use metrics_exporter_prometheus::PrometheusHandle;

/// Register descriptions for every metric the crate emits.
pub fn describe_metrics() {
    metrics::describe_counter!(
        "jobs_proxy_requests_total",
        "Requests served by the /api/jobs proxy, by response status"
    );
    metrics::describe_counter!(
        "upstream_queries_total",
        "Job searches issued by the aggregator"
    );
    metrics::describe_counter!(
        "upstream_query_failures_total",
        "Job searches that failed"
    );
    metrics::describe_counter!("job_cache_hits_total", "Loads served from the listing cache");
    metrics::describe_counter!(
        "job_cache_misses_total",
        "Cacheable loads that found no fresh cache entry"
    );
    metrics::describe_histogram!(
        "aggregation_seconds",
        "Time to fetch and merge listings for one load"
    );
}

/// GET /metrics: Prometheus text exposition.
pub async fn prometheus_metrics(State(handle): State<Arc<PrometheusHandle>>) -> impl IntoResponse {
    handle.render()
}
