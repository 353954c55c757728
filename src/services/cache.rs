use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::job::JobRecord;
use crate::services::store::KeyValueStore;

/// Storage key of the single cache slot.
pub const CACHE_KEY: &str = "iowa-dev-jobs-cache";

/// Default freshness window (30 minutes).
pub const DEFAULT_TTL: Duration = Duration::minutes(30);

/// Persisted shape: the listings and the capture time in epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub jobs: Vec<JobRecord>,
    pub timestamp: i64,
}

impl CacheEntry {
    /// `None` when the stored timestamp is too far out to measure.
    pub fn age(&self, now: DateTime<Utc>) -> Option<Duration> {
        now.timestamp_millis()
            .checked_sub(self.timestamp)
            .and_then(Duration::try_milliseconds)
    }
}

/// Single-slot, time-bounded cache of the default listing view.
///
/// Best effort throughout: storage and decoding failures read as a miss and
/// writes never fail the caller.
#[derive(Clone)]
pub struct JobCache {
    store: Arc<dyn KeyValueStore>,
    ttl: Duration,
}

impl JobCache {
    pub fn new(store: Arc<dyn KeyValueStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub async fn read(&self) -> Option<Vec<JobRecord>> {
        self.read_at(Utc::now()).await.map(|entry| entry.jobs)
    }

    pub async fn write(&self, jobs: &[JobRecord]) {
        self.write_at(jobs, Utc::now()).await
    }

    /// Fresh entry as of `now`. An expired entry, or one stamped after
    /// `now`, is removed from storage.
    pub async fn read_at(&self, now: DateTime<Utc>) -> Option<CacheEntry> {
        let raw = match self.store.get(CACHE_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "Listing cache unavailable");
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "Discarding malformed listing cache");
                return None;
            }
        };

        match entry.age(now) {
            Some(age) if age >= Duration::zero() && age <= self.ttl => Some(entry),
            age => {
                debug!(age_secs = ?age.map(|a| a.num_seconds()), "Listing cache expired");
                if let Err(e) = self.store.remove(CACHE_KEY).await {
                    warn!(error = %e, "Failed to clear expired listing cache");
                }
                None
            }
        }
    }

    /// Replace the slot with `jobs` captured at `now`.
    pub async fn write_at(&self, jobs: &[JobRecord], now: DateTime<Utc>) {
        let entry = CacheEntry {
            jobs: jobs.to_vec(),
            timestamp: now.timestamp_millis(),
        };

        let payload = match serde_json::to_string(&entry) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Failed to serialize listing cache");
                return;
            }
        };

        match self.store.set(CACHE_KEY, &payload).await {
            Ok(()) => debug!(jobs = jobs.len(), "Listing cache written"),
            Err(e) => warn!(error = %e, "Failed to write listing cache"),
        }
    }

    pub async fn clear(&self) {
        if let Err(e) = self.store.remove(CACHE_KEY).await {
            warn!(error = %e, "Failed to clear listing cache");
        }
    }
}
