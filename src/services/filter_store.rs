use std::sync::Arc;

use garde::Validate;
use tracing::{debug, warn};

use crate::models::filter::{DateRange, ExperienceLevel, FilterState};
use crate::models::job::CategoryTag;
use crate::services::store::KeyValueStore;

/// Storage key of the persisted filter preferences.
pub const FILTERS_KEY: &str = "iowa-dev-jobs-filters";

/// Owner of the user's [`FilterState`].
///
/// Every successful mutation is written to the attached store, if any.
/// Persistence is best effort; a failed write is logged and the in-memory
/// state still changes.
pub struct FilterStore {
    state: FilterState,
    persist: Option<Arc<dyn KeyValueStore>>,
}

impl FilterStore {
    /// A store without persistence, starting from defaults.
    pub fn in_memory() -> Self {
        Self {
            state: FilterState::default(),
            persist: None,
        }
    }

    /// Restore persisted preferences. Missing, malformed or invalid data
    /// starts from defaults.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let state = match store.get(FILTERS_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<FilterState>(&raw) {
                Ok(state) if state.validate().is_ok() => state,
                Ok(_) => {
                    warn!("Persisted filters failed validation, using defaults");
                    FilterState::default()
                }
                Err(e) => {
                    warn!(error = %e, "Persisted filters unreadable, using defaults");
                    FilterState::default()
                }
            },
            Ok(None) => FilterState::default(),
            Err(e) => {
                warn!(error = %e, "Filter store unavailable, using defaults");
                FilterState::default()
            }
        };

        Self {
            state,
            persist: Some(store),
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub async fn set_city(&mut self, city: impl Into<String>) -> Result<(), FilterError> {
        let city = city.into();
        self.update(|s| s.city = city).await
    }

    pub async fn set_category(&mut self, category: Option<CategoryTag>) -> Result<(), FilterError> {
        self.update(|s| s.category = category).await
    }

    pub async fn set_date_range(&mut self, date_range: DateRange) -> Result<(), FilterError> {
        self.update(|s| s.date_range = date_range).await
    }

    pub async fn set_experience_level(
        &mut self,
        level: ExperienceLevel,
    ) -> Result<(), FilterError> {
        self.update(|s| s.experience_level = level).await
    }

    pub async fn set_search_query(&mut self, query: impl Into<String>) -> Result<(), FilterError> {
        let query = query.into();
        self.update(|s| s.search_query = query).await
    }

    pub async fn reset(&mut self) {
        self.state = FilterState::default();
        self.save().await;
    }

    /// Apply several changes as one mutation.
    pub async fn update(
        &mut self,
        change: impl FnOnce(&mut FilterState),
    ) -> Result<(), FilterError> {
        let mut next = self.state.clone();
        change(&mut next);
        next.validate()?;

        if next != self.state {
            self.state = next;
            self.save().await;
        }
        Ok(())
    }

    async fn save(&self) {
        let Some(store) = &self.persist else {
            return;
        };

        let payload = match serde_json::to_string(&self.state) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Failed to serialize filters");
                return;
            }
        };

        match store.set(FILTERS_KEY, &payload).await {
            Ok(()) => debug!("Filters persisted"),
            Err(e) => warn!(error = %e, "Failed to persist filters"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("Invalid filter: {0}")]
    Invalid(#[from] garde::Report),
}
