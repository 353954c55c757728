//! Multi-query job aggregation.
//!
//! An unsearched load runs a bounded prefix of planned broad queries one at a
//! time, tolerates individual failures, merges the results (first occurrence
//! of an id wins) and sorts newest first. The unsearched, unrestricted view is
//! served from and written to the single-slot [`JobCache`].

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::models::company::PRIORITY_EMPLOYERS;
use crate::models::filter::QueryKey;
use crate::models::job::JobRecord;
use crate::services::cache::JobCache;
use crate::services::jobs_api::{JobSearch, SearchRequest, UpstreamError};

/// Queries executed per unsearched load.
pub const DEFAULT_QUERY_BUDGET: usize = 3;

/// Employer-specific queries appended after the role queries.
pub const EMPLOYER_QUERY_COUNT: usize = 5;

const ROLE_QUERIES: &[&str] = &[
    "software engineer",
    "software developer",
    "web developer",
    "full stack developer",
    "frontend developer",
    "backend developer",
    "devops engineer",
    "data engineer",
];

/// Builds the candidate query list for a load.
#[derive(Debug, Clone)]
pub struct QueryPlanner {
    default_location: String,
    budget: usize,
}

impl QueryPlanner {
    pub fn new(default_location: impl Into<String>, budget: usize) -> Self {
        Self {
            default_location: default_location.into(),
            budget,
        }
    }

    pub fn resolve_location<'a>(&'a self, key: &'a QueryKey) -> &'a str {
        key.city().unwrap_or(self.default_location.as_str())
    }

    /// The single query of a free-text search.
    pub fn search_query(&self, key: &QueryKey, search: &str) -> String {
        format!("{search} in {}", self.resolve_location(key))
    }

    /// Every candidate, role queries first, then priority employers.
    pub fn candidates(&self, key: &QueryKey) -> Vec<String> {
        let location = self.resolve_location(key);
        ROLE_QUERIES
            .iter()
            .map(|role| format!("{role} in {location}"))
            .chain(
                PRIORITY_EMPLOYERS
                    .iter()
                    .take(EMPLOYER_QUERY_COUNT)
                    .map(|employer| format!("{employer} software {}", self.default_location)),
            )
            .collect()
    }

    /// The budgeted prefix of [`Self::candidates`] that actually runs.
    pub fn plan(&self, key: &QueryKey) -> Vec<String> {
        let mut candidates = self.candidates(key);
        candidates.truncate(self.budget);
        candidates
    }
}

/// Result of one planned query.
#[derive(Debug)]
pub enum QueryOutcome {
    Fetched { query: String, jobs: Vec<JobRecord> },
    Failed { query: String, reason: String },
}

impl QueryOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Merge outcomes in execution order.
///
/// Each id appears once and the first record seen for it is kept. Failed
/// queries contribute nothing, so all-failed yields an empty collection
/// rather than an error. The result is sorted newest first; undated records
/// go last.
pub fn merge_outcomes(outcomes: Vec<QueryOutcome>) -> Vec<JobRecord> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for outcome in outcomes {
        if let QueryOutcome::Fetched { jobs, .. } = outcome {
            for job in jobs {
                if seen.insert(job.id.clone()) {
                    merged.push(job);
                }
            }
        }
    }

    sort_newest_first(&mut merged);
    merged
}

pub fn sort_newest_first(jobs: &mut [JobRecord]) {
    jobs.sort_unstable_by(|a, b| b.posted_at.cmp(&a.posted_at));
}

/// Cache-or-fetch orchestration over a [`JobSearch`] source.
#[derive(Clone)]
pub struct Aggregator {
    source: Arc<dyn JobSearch>,
    cache: JobCache,
    planner: QueryPlanner,
}

impl Aggregator {
    pub fn new(source: Arc<dyn JobSearch>, cache: JobCache, planner: QueryPlanner) -> Self {
        Self {
            source,
            cache,
            planner,
        }
    }

    pub fn from_config(source: Arc<dyn JobSearch>, cache: JobCache, config: &AppConfig) -> Self {
        Self::new(
            source,
            cache,
            QueryPlanner::new(config.default_location.clone(), config.query_budget),
        )
    }

    /// Listings for `key`, deduplicated and newest first.
    ///
    /// Only a free-text search can fail: it is the sole query of its load.
    pub async fn fetch(&self, key: &QueryKey) -> Result<Vec<JobRecord>, UpstreamError> {
        let cacheable = key.is_cacheable();

        if cacheable {
            if let Some(jobs) = self.cache.read().await {
                metrics::counter!("job_cache_hits_total").increment(1);
                debug!(jobs = jobs.len(), "Serving listings from cache");
                return Ok(jobs);
            }
            metrics::counter!("job_cache_misses_total").increment(1);
        }

        let start = Instant::now();

        if let Some(search) = key.search_query() {
            let query = self.planner.search_query(key, search);
            metrics::counter!("upstream_queries_total").increment(1);
            let jobs = self
                .source
                .search(&self.request(key, query))
                .await
                .inspect_err(|_| metrics::counter!("upstream_query_failures_total").increment(1))?;
            metrics::histogram!("aggregation_seconds").record(start.elapsed().as_secs_f64());
            return Ok(jobs);
        }

        let outcomes = self.run_queries(key).await;
        let failed = outcomes.iter().filter(|o| o.is_failed()).count();
        let attempted = outcomes.len();
        let jobs = merge_outcomes(outcomes);

        info!(
            attempted,
            failed,
            jobs = jobs.len(),
            "Aggregated listings"
        );
        metrics::histogram!("aggregation_seconds").record(start.elapsed().as_secs_f64());

        if cacheable {
            self.cache.write(&jobs).await;
        }

        Ok(jobs)
    }

    /// Run the planned queries sequentially, capturing each outcome.
    pub async fn run_queries(&self, key: &QueryKey) -> Vec<QueryOutcome> {
        let mut outcomes = Vec::new();

        for query in self.planner.plan(key) {
            metrics::counter!("upstream_queries_total").increment(1);
            let request = self.request(key, query.clone());
            let outcome = match self.source.search(&request).await {
                Ok(jobs) => QueryOutcome::Fetched { query, jobs },
                Err(e) => {
                    metrics::counter!("upstream_query_failures_total").increment(1);
                    warn!(query = %query, error = %e, "Search failed, continuing with remaining queries");
                    QueryOutcome::Failed {
                        query,
                        reason: e.to_string(),
                    }
                }
            };
            outcomes.push(outcome);
        }

        outcomes
    }

    fn request(&self, key: &QueryKey, query: String) -> SearchRequest {
        SearchRequest::new(query)
            .date_range(key.date_range)
            .experience_level(key.experience_level)
    }
}
