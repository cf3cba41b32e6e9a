//! Registry configuration
//!
//! Holds the endpoint, timeout and cache lifetime used when loading sponsors
//! from the GitHub API. Defaults match the public GitHub service.

use std::time::Duration;

/// GitHub GraphQL endpoint
pub const GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// Configuration for remote loading and caching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// GraphQL endpoint to POST the sponsors query to
    pub endpoint: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// How long a fetched sponsor list stays in the cache
    pub cache_ttl: Duration,
    /// User-Agent header sent with the request (GitHub rejects requests without one)
    pub user_agent: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            endpoint: GITHUB_GRAPHQL_URL.to_string(),
            timeout: Duration::from_secs(20),
            cache_ttl: Duration::from_secs(24 * 60 * 60), // 1 day
            user_agent: concat!("ghsponsors/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl RegistryConfig {
    /// Use a different GraphQL endpoint (e.g. a GitHub Enterprise host)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the cache lifetime
    pub fn with_cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
