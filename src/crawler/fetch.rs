use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::future::Future;
use std::time::Duration;
use url::Url;

use super::config::CrawlerConfig;
use crate::error::CrawlError;

/// Source of page bodies for the crawler.
pub trait PageFetcher: Send + Sync + 'static {
    /// Returns the HTML body of `url`, or why it can't be expanded.
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<String, CrawlError>> + Send;
}

/// Fetches pages over HTTP with a shared `reqwest` client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &CrawlerConfig) -> Result<Self, CrawlError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_sec))
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<String, CrawlError>> + Send {
        let request = self.client.get(url.clone());
        async move {
            let response = request.send().await?;

            let status = response.status();
            if !status.is_success() {
                return Err(CrawlError::Http { status: status.as_u16() });
            }

            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_string();
            if !content_type.contains("text/html") {
                return Err(CrawlError::ContentType(content_type));
            }

            Ok(response.text().await?)
        }
    }
}
