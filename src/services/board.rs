//! Binds the filter state to the aggregator and tracks the load lifecycle.

use tracing::debug;

use crate::models::filter::QueryKey;
use crate::models::job::{CategoryTag, JobRecord};
use crate::services::aggregator::Aggregator;
use crate::services::filter_store::FilterStore;
use crate::services::jobs_api::UpstreamError;

/// Shown when a failed load carries no message of its own.
pub const ERROR_FALLBACK: &str = "We had trouble fetching jobs. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Failed(String),
    Ready,
}

/// Identifies one load; only the newest ticket for the current key applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    key: QueryKey,
    generation: u64,
}

impl LoadTicket {
    pub fn key(&self) -> &QueryKey {
        &self.key
    }
}

/// What the presentation layer renders.
#[derive(Debug)]
pub struct JobsView<'a> {
    /// Listings after the category filter.
    pub jobs: Vec<&'a JobRecord>,
    /// Everything the last successful load returned.
    pub all_jobs: &'a [JobRecord],
    pub is_loading: bool,
    pub is_error: bool,
    pub error: Option<&'a str>,
}

impl JobsView<'_> {
    /// Loaded successfully but nothing matched.
    pub fn is_empty_result(&self) -> bool {
        !self.is_loading && !self.is_error && self.jobs.is_empty()
    }
}

/// Keep listings tagged with `category`, or all of them when `None`.
pub fn filter_by_category(jobs: &[JobRecord], category: Option<CategoryTag>) -> Vec<&JobRecord> {
    match category {
        Some(tag) => jobs.iter().filter(|job| job.has_category(tag)).collect(),
        None => jobs.iter().collect(),
    }
}

pub struct JobBoard {
    aggregator: Aggregator,
    filters: FilterStore,
    active: Option<QueryKey>,
    generation: u64,
    status: LoadStatus,
    jobs: Vec<JobRecord>,
}

impl JobBoard {
    pub fn new(aggregator: Aggregator, filters: FilterStore) -> Self {
        Self {
            aggregator,
            filters,
            active: None,
            generation: 0,
            status: LoadStatus::Idle,
            jobs: Vec::new(),
        }
    }

    pub fn filters(&self) -> &FilterStore {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut FilterStore {
        &mut self.filters
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn query_key(&self) -> QueryKey {
        self.filters.state().query_key()
    }

    /// Whether the current filters select something not yet loaded.
    pub fn needs_load(&self) -> bool {
        self.status == LoadStatus::Idle || self.active.as_ref() != Some(&self.query_key())
    }

    /// Start a load for the current key, superseding any in flight.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        let key = self.query_key();
        self.active = Some(key.clone());
        self.status = LoadStatus::Loading;
        LoadTicket {
            key,
            generation: self.generation,
        }
    }

    /// Apply a finished load. Returns `false` when the ticket was superseded
    /// and the result discarded.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<JobRecord>, UpstreamError>,
    ) -> bool {
        if ticket.generation != self.generation || self.active.as_ref() != Some(&ticket.key) {
            debug!(
                generation = ticket.generation,
                current = self.generation,
                "Discarding stale load"
            );
            return false;
        }

        match result {
            Ok(jobs) => {
                self.jobs = jobs;
                self.status = LoadStatus::Ready;
            }
            Err(e) => {
                self.status = LoadStatus::Failed(e.to_string());
            }
        }
        true
    }

    /// Load if the filters changed since the last load.
    pub async fn sync(&mut self) {
        if self.needs_load() {
            self.load().await;
        }
    }

    /// Load the current key unconditionally.
    pub async fn load(&mut self) {
        let ticket = self.begin_load();
        let result = self.aggregator.fetch(ticket.key()).await;
        self.finish_load(ticket, result);
    }

    /// Re-run the full aggregation after a failure.
    pub async fn retry(&mut self) {
        self.load().await;
    }

    pub fn view(&self) -> JobsView<'_> {
        let (is_error, error) = match &self.status {
            LoadStatus::Failed(message) if message.is_empty() => (true, Some(ERROR_FALLBACK)),
            LoadStatus::Failed(message) => (true, Some(message.as_str())),
            _ => (false, None),
        };

        JobsView {
            jobs: filter_by_category(&self.jobs, self.filters.state().category),
            all_jobs: &self.jobs,
            is_loading: self.status == LoadStatus::Loading,
            is_error,
            error,
        }
    }
}
