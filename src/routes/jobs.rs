//! `/api/jobs`: credential-injecting pass-through to JSearch `/search`.

use axum::extract::{Query, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::Url;
use tracing::{debug, warn};

use crate::app_state::AppState;

/// GET /api/jobs: forward the search to the provider and relay its body verbatim.
pub async fn proxy_jobs(
    method: Method,
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let response = match forward(&method, &state, &params).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    };

    metrics::counter!(
        "jobs_proxy_requests_total",
        "status" => response.status().as_u16().to_string()
    )
    .increment(1);

    response
}

async fn forward(
    method: &Method,
    state: &AppState,
    params: &[(String, String)],
) -> Result<Response, ProxyError> {
    if method != Method::GET {
        return Err(ProxyError::MethodNotAllowed);
    }

    let api_key = state
        .config
        .credential()
        .ok_or(ProxyError::MissingCredential)?;

    let mut upstream_params = vec![
        ("query", first_param(params, "query").unwrap_or("")),
        ("page", first_param(params, "page").unwrap_or("1")),
        ("num_pages", first_param(params, "num_pages").unwrap_or("3")),
        ("date_posted", first_param(params, "date_posted").unwrap_or("all")),
    ];
    if let Some(requirements) = first_param(params, "job_requirements") {
        upstream_params.push(("job_requirements", requirements));
    }

    let base = state.config.jsearch_base_url.trim_end_matches('/');
    let url = Url::parse_with_params(&format!("{base}/search"), &upstream_params)
        .map_err(|e| ProxyError::Transport(e.to_string()))?;

    debug!(query = upstream_params[0].1, "Forwarding job search");

    let upstream = state
        .http
        .get(url)
        .header("X-RapidAPI-Key", api_key)
        .header("X-RapidAPI-Host", &state.config.rapidapi_host)
        .send()
        .await
        .map_err(|e| ProxyError::Transport(e.to_string()))?;

    let status = upstream.status();
    let body = upstream
        .text()
        .await
        .map_err(|e| ProxyError::Transport(e.to_string()))?;

    if !status.is_success() {
        return Err(ProxyError::Upstream {
            status: status.as_u16(),
            body,
        });
    }

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}

/// Value of the first occurrence of `name`; `None` when absent or empty.
fn first_param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
        .filter(|value| !value.is_empty())
}

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Missing RAPIDAPI_KEY")]
    MissingCredential,

    #[error("Failed to fetch RapidAPI: {0}")]
    Transport(String),

    #[error("Upstream returned {status}")]
    Upstream { status: u16, body: String },
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ProxyError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
            }
            ProxyError::MissingCredential => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Missing RAPIDAPI_KEY".to_string(),
            ),
            ProxyError::Transport(reason) => {
                warn!(error = %reason, "Upstream request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch RapidAPI".to_string(),
                )
            }
            ProxyError::Upstream { status, body } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                body,
            ),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_first_param() {
        let p = params(&[("query", "rust"), ("query", "go"), ("page", "")]);
        assert_eq!(first_param(&p, "query"), Some("rust"));
        assert_eq!(first_param(&p, "page"), None);
        assert_eq!(first_param(&p, "num_pages"), None);

        // Later occurrences never replace an empty first one.
        let p = params(&[("query", ""), ("query", "rust")]);
        assert_eq!(first_param(&p, "query"), None);
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            ProxyError::MethodNotAllowed.into_response().status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ProxyError::MissingCredential.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ProxyError::Upstream {
                status: 429,
                body: "slow down".to_string()
            }
            .into_response()
            .status(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }
}
