//! Raw JSearch response shapes.
//!
//! Only [`crate::services::jobs_api`] reads these field names; everything
//! downstream works on [`crate::models::job::JobRecord`].

use serde::{Deserialize, Serialize};

/// Envelope returned by `GET /search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JSearchResponse {
    pub status: String,
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub data: Vec<JSearchJob>,
}

/// A single posting as the provider returns it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JSearchJob {
    pub job_id: String,
    #[serde(default)]
    pub employer_name: String,
    #[serde(default)]
    pub employer_logo: Option<String>,
    #[serde(default)]
    pub employer_website: Option<String>,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub job_city: Option<String>,
    #[serde(default)]
    pub job_state: Option<String>,
    #[serde(default)]
    pub job_country: Option<String>,
    #[serde(default)]
    pub job_employment_type: Option<String>,
    #[serde(default)]
    pub job_apply_link: String,
    #[serde(default)]
    pub job_posted_at_datetime_utc: Option<String>,
    #[serde(default)]
    pub job_min_salary: Option<f64>,
    #[serde(default)]
    pub job_max_salary: Option<f64>,
    #[serde(default)]
    pub job_salary_currency: Option<String>,
    #[serde(default)]
    pub job_salary_period: Option<String>,
    #[serde(default)]
    pub job_is_remote: bool,
    #[serde(default)]
    pub job_highlights: Option<JSearchHighlights>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JSearchHighlights {
    #[serde(rename = "Qualifications", default)]
    pub qualifications: Option<Vec<String>>,
    #[serde(rename = "Responsibilities", default)]
    pub responsibilities: Option<Vec<String>>,
    #[serde(rename = "Benefits", default)]
    pub benefits: Option<Vec<String>>,
}
