use std::sync::Arc;
use url::Url;

/// Default timeout for page requests in seconds
pub const LINK_REQUEST_TIMEOUT_SEC: u64 = 10;

/// Configuration for the crawler
pub struct CrawlerConfig {
    pub starting_url: Url,
    /// Number of workers, i.e. pages processed at the same time
    pub max_concurrency: usize,
    /// Soft ceiling on distinct pages registered in the ledger
    pub max_pages: usize,
    pub request_delay_ms: u64,
    pub request_timeout_sec: u64,
}

impl CrawlerConfig {
    pub fn new(starting_url: Url) -> Self {
        Self {
            starting_url,
            max_concurrency: 2,
            max_pages: 10,
            request_delay_ms: 0,
            request_timeout_sec: LINK_REQUEST_TIMEOUT_SEC,
        }
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_request_delay(mut self, delay_ms: u64) -> Self {
        self.request_delay_ms = delay_ms;
        self
    }

    pub fn with_request_timeout(mut self, timeout_sec: u64) -> Self {
        self.request_timeout_sec = timeout_sec;
        self
    }

    /// True when `url` lives on the same host as the starting url
    pub fn in_scope(&self, url: &Url) -> bool {
        match (self.starting_url.host_str(), url.host_str()) {
            (Some(base), Some(target)) => base == target,
            _ => false,
        }
    }
}

pub type CrawlerConfigRef = Arc<CrawlerConfig>;
