//! Jobs API client against a live proxy in front of a fake provider.

mod fixtures;
mod helpers;

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use serde_json::json;

use fixtures::*;
use helpers::*;
use iowa_dev_jobs::models::filter::{DateRange, ExperienceLevel, QueryKey};
use iowa_dev_jobs::models::job::CategoryTag;
use iowa_dev_jobs::routes::api_router;
use iowa_dev_jobs::services::aggregator::{Aggregator, QueryPlanner};
use iowa_dev_jobs::services::cache::{JobCache, DEFAULT_TTL};
use iowa_dev_jobs::services::jobs_api::{JobSearch, JobsApiClient, SearchRequest, UpstreamError};
use iowa_dev_jobs::services::store::MemoryStore;

/// Proxy with a credential, forwarding to a provider answering with `behavior`.
async fn proxied(behavior: Reply) -> (JobsApiClient, Arc<std::sync::Mutex<Vec<RecordedRequest>>>) {
    let (provider, requests) = spawn_provider(behavior).await;
    let proxy = spawn(api_router(proxy_state(&provider, Some("test-key")))).await;
    (JobsApiClient::with_client(reqwest::Client::new(), proxy), requests)
}

#[tokio::test]
async fn test_search_normalizes_and_categorizes() {
    let body = jsearch_body(vec![
        jsearch_job(
            "fe-1",
            "Senior React Developer",
            "Own our TypeScript UI",
            "2026-06-01T12:30:00.000Z",
        ),
        jsearch_job("bad-date", "Kubernetes Engineer", "Terraform and CI/CD", "yesterday"),
    ]);
    let (client, _) = proxied(reply(move |_| (200, body.clone()))).await;

    let jobs = client
        .search(&SearchRequest::new("software engineer in Iowa"))
        .await
        .unwrap();

    assert_eq!(jobs.len(), 2);
    let frontend = &jobs[0];
    assert_eq!(frontend.id, "fe-1");
    assert_eq!(frontend.company, "Workiva");
    assert_eq!(frontend.location, "Ames, IA");
    assert_eq!(
        frontend.posted_at,
        Some(Utc.with_ymd_and_hms(2026, 6, 1, 12, 30, 0).unwrap())
    );
    assert!(frontend.has_category(CategoryTag::Frontend));
    assert_eq!(frontend.salary_min, Some(90000.0));

    let devops = &jobs[1];
    assert!(devops.posted_at.is_none());
    assert!(devops.has_category(CategoryTag::Devops));
}

#[tokio::test]
async fn test_request_params_reach_provider() {
    let (client, requests) = proxied(reply(|_| (200, jsearch_body(Vec::new())))).await;

    let request = SearchRequest::new("Python in Ames, IA")
        .date_range(DateRange::ThreeDays)
        .experience_level(ExperienceLevel::Entry);
    tokio_test::assert_ok!(client.search(&request).await);

    let recorded = requests.lock().unwrap().clone();
    assert_eq!(recorded.len(), 1);
    let params = &recorded[0].params;
    assert_eq!(params["query"], "Python in Ames, IA");
    assert_eq!(params["page"], "1");
    assert_eq!(params["num_pages"], "3");
    assert_eq!(params["date_posted"], "3days");
    assert_eq!(params["job_requirements"], "under_3_years_experience");
    assert_eq!(recorded[0].api_key.as_deref(), Some("test-key"));
}

#[tokio::test]
async fn test_provider_error_status() {
    let body = json!({ "status": "ERROR", "request_id": "r", "data": [] }).to_string();
    let (client, _) = proxied(reply(move |_| (200, body.clone()))).await;

    let err = client.search(&SearchRequest::new("q")).await.unwrap_err();
    assert!(matches!(&err, UpstreamError::ProviderStatus(s) if s == "ERROR"));
    assert_eq!(err.to_string(), "API returned error status: ERROR");
}

#[tokio::test]
async fn test_http_failure_carries_status() {
    let (client, _) = proxied(reply(|_| (429, "slow down".to_string()))).await;

    let err = tokio_test::assert_err!(client.search(&SearchRequest::new("q")).await);
    assert!(matches!(err, UpstreamError::Status { status: 429, .. }));
    assert_eq!(err.to_string(), "API error: 429 Too Many Requests");
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let (client, _) = proxied(reply(|_| (200, "<html>maintenance</html>".to_string()))).await;

    let err = client.search(&SearchRequest::new("q")).await.unwrap_err();
    assert!(matches!(err, UpstreamError::Decode(_)));
}

#[tokio::test]
async fn test_undecodable_query_is_tolerated_by_aggregator() {
    let (client, requests) = proxied(reply(|params| {
        if params.get("query").map(String::as_str) == Some("software developer in Iowa") {
            return (200, "not json".to_string());
        }
        let query = params.get("query").cloned().unwrap_or_default();
        let body = jsearch_body(vec![jsearch_job(
            &query,
            "Software Engineer",
            "",
            "2026-06-03T00:00:00Z",
        )]);
        (200, body)
    }))
    .await;

    let aggregator = Aggregator::new(
        Arc::new(client),
        JobCache::new(Arc::new(MemoryStore::new()), DEFAULT_TTL),
        QueryPlanner::new("Iowa", 3),
    );
    let jobs = aggregator.fetch(&QueryKey::default()).await.unwrap();

    assert_eq!(requests.lock().unwrap().len(), 3);
    let mut ids: Vec<_> = jobs.iter().map(|j| j.id.as_str()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["software engineer in Iowa", "web developer in Iowa"]);
}

#[tokio::test]
async fn test_proxy_without_credential_fails_search() {
    let (provider, requests) =
        spawn_provider(reply(|_| (200, jsearch_body(Vec::new())))).await;
    let proxy = spawn(api_router(proxy_state(&provider, None))).await;
    let client = JobsApiClient::with_client(reqwest::Client::new(), proxy);

    let err = client.search(&SearchRequest::new("q")).await.unwrap_err();
    assert!(matches!(err, UpstreamError::Status { status: 500, .. }));
    assert!(requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_aggregator_over_http() {
    // Every broad query sees the same posting plus one unique to it.
    let (client, requests) = proxied(reply(|params| {
        let query = params.get("query").cloned().unwrap_or_default();
        let body = jsearch_body(vec![
            jsearch_job("shared", "Software Engineer", "Rust services", "2026-06-02T00:00:00Z"),
            jsearch_job(&query, "Web Developer", "React and Node", "2026-06-05T00:00:00Z"),
        ]);
        (200, body)
    }))
    .await;

    let store = Arc::new(MemoryStore::new());
    let aggregator = Aggregator::new(
        Arc::new(client),
        JobCache::new(store.clone(), DEFAULT_TTL),
        QueryPlanner::new("Iowa", 3),
    );

    let jobs = aggregator.fetch(&QueryKey::default()).await.unwrap();

    assert_eq!(requests.lock().unwrap().len(), 3);
    assert_eq!(jobs.len(), 4);
    assert_eq!(jobs.last().unwrap().id, "shared");
    assert!(store.contains("iowa-dev-jobs-cache"));

    // Second load is served from the cache.
    let again = aggregator.fetch(&QueryKey::default()).await.unwrap();
    assert_eq!(requests.lock().unwrap().len(), 3);
    assert_eq!(again.len(), 4);
}
