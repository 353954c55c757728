//! Sample listings and provider payloads

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use iowa_dev_jobs::models::job::{CategoryTag, JobRecord};
use serde_json::{json, Value};

/// A normalized listing posted on `day` of June 2026 (undated when `None`).
pub fn job(id: &str, title: &str, day: Option<u32>) -> JobRecord {
    JobRecord {
        id: id.to_string(),
        title: title.to_string(),
        company: "Source Allies".to_string(),
        company_logo: None,
        company_website: None,
        location: "Des Moines, IA".to_string(),
        city: Some("Des Moines".to_string()),
        state: Some("IA".to_string()),
        is_remote: false,
        employment_type: "FULLTIME".to_string(),
        apply_link: format!("https://example.com/apply/{id}"),
        posted_at: day.map(|d| Utc.with_ymd_and_hms(2026, 6, d, 9, 0, 0).unwrap()),
        description: String::new(),
        salary_min: None,
        salary_max: None,
        salary_currency: None,
        salary_period: None,
        categories: vec![CategoryTag::Fullstack],
        highlights: None,
    }
}

pub fn tagged(id: &str, day: u32, categories: Vec<CategoryTag>) -> JobRecord {
    JobRecord {
        categories,
        ..job(id, id, Some(day))
    }
}

/// A raw JSearch posting.
pub fn jsearch_job(id: &str, title: &str, description: &str, posted: &str) -> Value {
    json!({
        "job_id": id,
        "employer_name": "Workiva",
        "employer_logo": "https://example.com/workiva.png",
        "employer_website": "https://www.workiva.com",
        "job_title": title,
        "job_description": description,
        "job_city": "Ames",
        "job_state": "IA",
        "job_country": "US",
        "job_employment_type": "FULLTIME",
        "job_apply_link": format!("https://example.com/apply/{id}"),
        "job_posted_at_datetime_utc": posted,
        "job_min_salary": 90000.0,
        "job_max_salary": 130000.0,
        "job_salary_currency": "USD",
        "job_salary_period": "YEAR",
        "job_is_remote": false,
        "job_highlights": {
            "Qualifications": ["3+ years of TypeScript"],
            "Benefits": ["Hybrid schedule"]
        }
    })
}

/// Successful `/search` body.
pub fn jsearch_body(jobs: Vec<Value>) -> String {
    json!({
        "status": "OK",
        "request_id": "test-request",
        "data": jobs
    })
    .to_string()
}
