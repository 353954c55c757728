use chrono::Duration;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Proxy bind address (e.g., "0.0.0.0:3000").
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// RapidAPI key injected by the proxy. Requests fail with 500 while unset.
    #[serde(default)]
    pub rapidapi_key: Option<String>,

    /// RapidAPI host header value
    #[serde(default = "default_rapidapi_host")]
    pub rapidapi_host: String,

    /// JSearch base URL the proxy forwards to
    #[serde(default = "default_jsearch_base_url")]
    pub jsearch_base_url: String,

    /// Origin of the proxy, used by the job board client
    #[serde(default = "default_jobs_api_url")]
    pub jobs_api_url: String,

    /// Directory for file-backed state (filters, listing cache)
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Redis connection string. When set, durable state lives in Redis.
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Location used in queries when no city filter is selected
    #[serde(default = "default_location")]
    pub default_location: String,

    /// Planned queries executed per unfiltered load
    #[serde(default = "default_query_budget")]
    pub query_budget: usize,

    /// Freshness window of the listing cache, in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_rapidapi_host() -> String {
    "jsearch.p.rapidapi.com".to_string()
}

fn default_jsearch_base_url() -> String {
    "https://jsearch.p.rapidapi.com".to_string()
}

fn default_jobs_api_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_data_dir() -> String {
    ".iowa-dev-jobs".to_string()
}

fn default_location() -> String {
    "Iowa".to_string()
}

fn default_query_budget() -> usize {
    3
}

fn default_cache_ttl_secs() -> u64 {
    30 * 60
}

impl AppConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Build from an explicit set of variables, without touching the process environment.
    pub fn from_iter<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }

    /// Credential with blank values treated as missing.
    pub fn credential(&self) -> Option<&str> {
        self.rapidapi_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Cache freshness window, or `None` when `CACHE_TTL_SECS` is out of range.
    pub fn cache_ttl(&self) -> Option<Duration> {
        i64::try_from(self.cache_ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
    }
}
