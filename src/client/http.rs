//! HTTP client abstraction for analyzer API requests.

use reqwest::Client;
use std::time::Duration;

// ============================================================================
// Constants
// ============================================================================

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Configuration
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl HttpConfig {
    /// Create config with custom timeout
    #[must_use]
    pub const fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

// ============================================================================
// HTTP Client
// ============================================================================

/// Base HTTP client wrapper
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    config: HttpConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Client::new(),
            config: HttpConfig::default(),
        }
    }

    /// Create a new HTTP client with custom configuration
    #[must_use]
    pub fn with_config(config: HttpConfig) -> Self {
        Self {
            inner: Client::new(),
            config,
        }
    }

    /// Get the configuration
    #[must_use]
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Build a GET request with standard headers
    pub fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.inner
            .get(url)
            .header("accept", "application/json")
            .timeout(self.config.timeout)
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}
