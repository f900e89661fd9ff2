use serde::Serialize;
use std::fmt;
use url::Url;

use crate::error::CrawlError;

/// Key under which a page is counted: `scheme://host[:port]/path` without
/// query, fragment or trailing slashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NormalizedUrl(String);

impl NormalizedUrl {
    pub fn from_url(url: &Url) -> Self {
        let mut key = format!("{}://{}", url.scheme(), url.host_str().unwrap_or_default());
        // `port()` is None for the scheme's default port
        if let Some(port) = url.port() {
            key.push(':');
            key.push_str(&port.to_string());
        }
        key.push_str(url.path().trim_end_matches('/'));
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parses `raw` and reduces it to its ledger key.
pub fn normalize_url(raw: &str) -> Result<NormalizedUrl, CrawlError> {
    let url = Url::parse(raw)?;
    Ok(NormalizedUrl::from_url(&url))
}
