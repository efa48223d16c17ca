//! # Crawler Configuration Module
//!
//! Configuration for the site crawler: the page-count limit that bounds a
//! crawl, the per-fetch timeout, and the user agent. Uses a builder pattern
//! for flexible configuration, with defaults matching a polite single-site
//! ingestion run.

use std::time::Duration;

/// Configuration for the crawler
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Maximum number of pages to record; one page past the limit may be
    /// recorded before the bound is observed
    pub page_limit: usize,

    /// Per-fetch timeout in milliseconds
    pub fetch_timeout_ms: u64,

    /// User agent to use for requests
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            page_limit: 20,
            fetch_timeout_ms: 30_000,
            user_agent: format!("webingest/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Builder for CrawlerConfig
#[derive(Debug, Default)]
pub struct CrawlerConfigBuilder {
    config: CrawlerConfig,
}

impl CrawlerConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: CrawlerConfig::default(),
        }
    }

    /// Set the maximum number of pages to crawl
    pub fn page_limit(mut self, page_limit: usize) -> Self {
        self.config.page_limit = page_limit;
        self
    }

    /// Set the per-fetch timeout in milliseconds
    pub fn fetch_timeout_ms(mut self, fetch_timeout_ms: u64) -> Self {
        self.config.fetch_timeout_ms = fetch_timeout_ms;
        self
    }

    /// Set the user agent to use for requests
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> CrawlerConfig {
        self.config
    }
}

impl CrawlerConfig {
    /// Create a new builder
    pub fn builder() -> CrawlerConfigBuilder {
        CrawlerConfigBuilder::new()
    }

    /// Get the fetch timeout as a Duration
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}
