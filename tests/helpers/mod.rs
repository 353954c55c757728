//! Test helper utilities: local servers, a fake JSearch provider and a
//! scripted search source.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use iowa_dev_jobs::app_state::AppState;
use iowa_dev_jobs::config::AppConfig;
use iowa_dev_jobs::models::job::JobRecord;
use iowa_dev_jobs::services::jobs_api::{JobSearch, SearchRequest, UpstreamError};

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Test server error");
    });
    format!("http://{addr}")
}

/// A request as the fake provider saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub params: HashMap<String, String>,
    pub api_key: Option<String>,
    pub host: Option<String>,
}

pub type Reply = Arc<dyn Fn(&HashMap<String, String>) -> (u16, String) + Send + Sync>;

/// Provider behavior: status and body for the received query parameters.
pub fn reply<F>(f: F) -> Reply
where
    F: Fn(&HashMap<String, String>) -> (u16, String) + Send + Sync + 'static,
{
    Arc::new(f)
}

struct ProviderState {
    reply: Reply,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Fake JSearch `/search`. Returns its base URL and the request log.
pub async fn spawn_provider(reply: Reply) -> (String, Arc<Mutex<Vec<RecordedRequest>>>) {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = Arc::new(ProviderState {
        reply,
        requests: requests.clone(),
    });
    let router = Router::new()
        .route("/search", get(provider_search))
        .with_state(state);
    (spawn(router).await, requests)
}

async fn provider_search(
    State(state): State<Arc<ProviderState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state.requests.lock().unwrap().push(RecordedRequest {
        params: params.clone(),
        api_key: header("x-rapidapi-key"),
        host: header("x-rapidapi-host"),
    });

    let (status, body) = (state.reply)(&params);
    (StatusCode::from_u16(status).unwrap(), body).into_response()
}

/// Proxy state pointed at `provider_url`, with or without a credential.
pub fn proxy_state(provider_url: &str, api_key: Option<&str>) -> AppState {
    let mut vars = vec![("JSEARCH_BASE_URL".to_string(), provider_url.to_string())];
    if let Some(key) = api_key {
        vars.push(("RAPIDAPI_KEY".to_string(), key.to_string()));
    }
    let config = AppConfig::from_iter(vars).expect("Invalid test config");
    AppState::new(config, reqwest::Client::new())
}

/// Search source answering from a per-query script and recording calls.
///
/// Unscripted queries succeed with no results. `Err(status)` fails the query
/// with that HTTP status.
#[derive(Default)]
pub struct ScriptedSearch {
    script: Mutex<HashMap<String, Result<Vec<JobRecord>, u16>>>,
    calls: Mutex<Vec<SearchRequest>>,
}

impl ScriptedSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, query: &str, result: Result<Vec<JobRecord>, u16>) {
        self.script
            .lock()
            .unwrap()
            .insert(query.to_string(), result);
    }

    pub fn calls(&self) -> Vec<SearchRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.query).collect()
    }
}

#[async_trait]
impl JobSearch for ScriptedSearch {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<JobRecord>, UpstreamError> {
        self.calls.lock().unwrap().push(request.clone());
        match self.script.lock().unwrap().get(&request.query) {
            Some(Ok(jobs)) => Ok(jobs.clone()),
            Some(Err(status)) => Err(UpstreamError::Status {
                status: *status,
                reason: "scripted failure".to_string(),
            }),
            None => Ok(Vec::new()),
        }
    }
}
