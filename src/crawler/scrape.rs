use scraper::{Html, Selector};
use url::Url;

use crate::error::CrawlError;

/// Collect the `href` of every `<a>` in `html`, in document order, resolved
/// against `base_url`. Duplicates are kept; counting them is the ledger's job.
///
/// A single reference that cannot be resolved fails the whole page.
pub fn extract_links(html: &str, base_url: &Url) -> Result<Vec<String>, CrawlError> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a")
        .map_err(|e| CrawlError::HtmlParse(format!("Failed to parse <a> selector: {}", e)))?;

    let mut links = Vec::new();
    for element in document.select(&selector) {
        for (name, value) in element.value().attrs() {
            if name == "href" {
                let resolved = base_url.join(value)?;
                links.push(resolved.to_string());
            }
        }
    }

    Ok(links)
}
