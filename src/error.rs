use thiserror::Error;

/// Failures local to a single crawl task. None of them stop the crawl.
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("invalid url: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("http error: {status}")]
    Http { status: u16 },
    #[error("response body not html (content-type: {0:?})")]
    ContentType(String),
    #[error("html parse error: {0}")]
    HtmlParse(String),
}
