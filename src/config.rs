use crate::core::{ConsoleError, Result};
use std::time::Duration;

/// Default quiet period between the last keystroke and a committed search.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Default number of rows requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Console runtime configuration
///
/// Built either through the builder methods or from `CARE_CONSOLE_*`
/// environment variables.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Base URL of the REST API, including the `/api/v1` prefix
    pub api_base_url: String,

    /// Bearer token sent with every request
    pub access_token: Option<String>,

    /// Refresh token; only its expiry is inspected
    pub refresh_token: Option<String>,

    /// Per-request timeout
    pub request_timeout: Duration,

    /// Search debounce quiet period
    pub search_debounce: Duration,

    /// Rows per page
    pub page_size: u32,

    /// Number of list snapshots kept per controller
    pub cache_capacity: usize,
}

impl ConsoleConfig {
    /// Create a configuration pointing at `api_base_url`
    pub fn new(api_base_url: &str) -> Self {
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            access_token: None,
            refresh_token: None,
            request_timeout: Duration::from_secs(15),
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
            page_size: DEFAULT_PAGE_SIZE,
            cache_capacity: 32,
        }
    }

    /// Set the bearer token
    pub fn access_token(mut self, token: &str) -> Self {
        self.access_token = Some(token.to_string());
        self
    }

    /// Set the refresh token
    pub fn refresh_token(mut self, token: &str) -> Self {
        self.refresh_token = Some(token.to_string());
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set search debounce
    pub fn search_debounce(mut self, quiet: Duration) -> Self {
        self.search_debounce = quiet;
        self
    }

    /// Set rows per page
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    /// Set snapshot cache capacity
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Load from the process environment (and a `.env` file if present).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("CARE_CONSOLE_API_URL")
            .unwrap_or_else(|| "http://127.0.0.1:8080/api/v1".to_string());
        let mut config = Self::new(&base_url);

        if let Some(token) = lookup("CARE_CONSOLE_ACCESS_TOKEN").filter(|t| !t.is_empty()) {
            config = config.access_token(&token);
        }
        if let Some(token) = lookup("CARE_CONSOLE_REFRESH_TOKEN").filter(|t| !t.is_empty()) {
            config = config.refresh_token(&token);
        }
        if let Some(raw) = lookup("CARE_CONSOLE_TIMEOUT_SECS") {
            let secs = raw.parse::<u64>().map_err(|_| {
                ConsoleError::Config("CARE_CONSOLE_TIMEOUT_SECS must be a valid u64".to_string())
            })?;
            config = config.request_timeout(Duration::from_secs(secs));
        }
        if let Some(raw) = lookup("CARE_CONSOLE_PAGE_SIZE") {
            let size = raw.parse::<u32>().map_err(|_| {
                ConsoleError::Config("CARE_CONSOLE_PAGE_SIZE must be a valid u32".to_string())
            })?;
            config = config.page_size(size);
        }

        config.validate()?;
        Ok(config)
    }

    /// Join a resource path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(ConsoleError::Config(
                "api_base_url must start with http:// or https://".to_string(),
            ));
        }

        if self.page_size == 0 || self.page_size > 100 {
            return Err(ConsoleError::Config(
                "page_size must be between 1 and 100".to_string(),
            ));
        }

        if self.cache_capacity == 0 {
            return Err(ConsoleError::Config("cache_capacity must be > 0".to_string()));
        }

        Ok(())
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::new("http://127.0.0.1:8080/api/v1")
    }
}
