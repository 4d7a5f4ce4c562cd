//! Client configuration.

use std::env;
use std::time::Duration;

/// Environment variable selecting the API base URL.
pub const API_URL_ENV: &str = "TICKETKIT_API_URL";

/// Default base URL, pointing at a local development backend.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Default per-request timeout.
///
/// The bound exists so a hung connection cannot block a caller's awaiting
/// chain indefinitely; the server applies its own timeouts as well.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for an [`crate::ApiClient`].
#[derive(Debug, Clone)]
pub struct Config {
    base_url: String,
    timeout: Duration,
}

impl Config {
    /// Creates a config for the given base URL. Trailing slashes are
    /// stripped so endpoint paths can always start with `/`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Reads the base URL from [`API_URL_ENV`], falling back to the local
    /// development default.
    #[must_use]
    pub fn from_env() -> Self {
        match env::var(API_URL_ENV) {
            Ok(url) if !url.is_empty() => Self::new(url),
            _ => Self::new(DEFAULT_API_URL),
        }
    }

    /// Overrides the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The API base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
