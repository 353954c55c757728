use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Url};
use tracing::debug;

use crate::models::filter::{DateRange, ExperienceLevel};
use crate::models::job::{Highlights, JobRecord};
use crate::models::jsearch::{JSearchJob, JSearchResponse};
use crate::services::categorize::categorize;

/// Result pages requested per query.
pub const PAGES_PER_QUERY: u32 = 3;

/// Parameters of a single provider search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub date_range: DateRange,
    pub experience_level: ExperienceLevel,
    pub page: u32,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            date_range: DateRange::Any,
            experience_level: ExperienceLevel::Unrestricted,
            page: 1,
        }
    }

    pub fn date_range(mut self, date_range: DateRange) -> Self {
        self.date_range = date_range;
        self
    }

    pub fn experience_level(mut self, level: ExperienceLevel) -> Self {
        self.experience_level = level;
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Query-string pairs understood by the proxy.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("query", self.query.clone()),
            ("page", self.page.to_string()),
            ("num_pages", PAGES_PER_QUERY.to_string()),
            ("date_posted", self.date_range.date_posted_param().to_string()),
        ];
        if let Some(requirements) = self.experience_level.job_requirements() {
            params.push(("job_requirements", requirements.to_string()));
        }
        params
    }
}

/// One provider search per call, results normalized.
#[async_trait]
pub trait JobSearch: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<JobRecord>, UpstreamError>;
}

/// Client for the same-origin `/api/jobs` proxy.
pub struct JobsApiClient {
    http: Client,
    base_url: String,
}

impl JobsApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, UpstreamError> {
        let http = Client::builder()
            .user_agent(concat!("iowa-dev-jobs/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, request: &SearchRequest) -> Result<Url, UpstreamError> {
        Url::parse_with_params(&format!("{}/api/jobs", self.base_url), request.params())
            .map_err(|e| UpstreamError::InvalidUrl(e.to_string()))
    }
}

#[async_trait]
impl JobSearch for JobsApiClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<JobRecord>, UpstreamError> {
        let url = self.endpoint(request)?;
        debug!(query = %request.query, %url, "Searching jobs");

        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let body = response.text().await?;
        let parsed: JSearchResponse = serde_json::from_str(&body)?;
        if parsed.status != "OK" {
            return Err(UpstreamError::ProviderStatus(parsed.status));
        }

        Ok(parsed.data.into_iter().map(normalize).collect())
    }
}

/// Map a raw provider record onto [`JobRecord`] and tag it.
pub fn normalize(job: JSearchJob) -> JobRecord {
    let categories = categorize(&job.job_title, &job.job_description);
    let location = join_location(job.job_city.as_deref(), job.job_state.as_deref());
    let posted_at = job
        .job_posted_at_datetime_utc
        .as_deref()
        .and_then(parse_posted_at);
    let highlights = job.job_highlights.map(|h| Highlights {
        qualifications: h.qualifications,
        responsibilities: h.responsibilities,
        benefits: h.benefits,
    });

    JobRecord {
        id: job.job_id,
        title: job.job_title,
        company: job.employer_name,
        company_logo: job.employer_logo,
        company_website: job.employer_website,
        location,
        city: job.job_city,
        state: job.job_state,
        is_remote: job.job_is_remote,
        employment_type: job.job_employment_type.unwrap_or_default(),
        apply_link: job.job_apply_link,
        posted_at,
        description: job.job_description,
        salary_min: job.job_min_salary,
        salary_max: job.job_max_salary,
        salary_currency: job.job_salary_currency,
        salary_period: job.job_salary_period,
        categories,
        highlights,
    }
}

fn join_location(city: Option<&str>, state: Option<&str>) -> String {
    [city, state]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_posted_at(raw: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(e) => {
            debug!(raw, error = %e, "Unparseable posting timestamp");
            None
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("API returned error status: {0}")]
    ProviderStatus(String),

    #[error("Failed to decode search response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid jobs API URL: {0}")]
    InvalidUrl(String),
}
