use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub places_api_key: String,
    pub places_base_url: String,
    pub places_language: Option<String>,
    pub exclusions_path: PathBuf,
    pub default_keywords: Vec<String>,
    pub default_radius_meters: u32,
    pub max_radius_meters: u32,
    pub provider_timeout_secs: u64,
    pub provider_max_retries: u32,
    pub provider_retry_backoff_ms: u64,
    /// Width of the per-call search semaphore. `None` means one slot per keyword.
    pub discovery_concurrency: Option<usize>,
    /// Overall wall-clock budget for one discovery call.
    pub discovery_deadline_secs: Option<u64>,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("places_api_key", &"[redacted]")
            .field("places_base_url", &self.places_base_url)
            .field("places_language", &self.places_language)
            .field("exclusions_path", &self.exclusions_path)
            .field("default_keywords", &self.default_keywords)
            .field("default_radius_meters", &self.default_radius_meters)
            .field("max_radius_meters", &self.max_radius_meters)
            .field("provider_timeout_secs", &self.provider_timeout_secs)
            .field("provider_max_retries", &self.provider_max_retries)
            .field("provider_retry_backoff_ms", &self.provider_retry_backoff_ms)
            .field("discovery_concurrency", &self.discovery_concurrency)
            .field("discovery_deadline_secs", &self.discovery_deadline_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
