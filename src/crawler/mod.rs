pub mod state;
pub mod config;
pub mod normalize;
pub mod scrape;
pub mod fetch;
pub mod queue;
pub mod runner;


pub use state::{CrawlerState, CrawlerStateRef, VisitLedger};
pub use config::{CrawlerConfig, CrawlerConfigRef, LINK_REQUEST_TIMEOUT_SEC};
pub use normalize::{NormalizedUrl, normalize_url};
pub use scrape::extract_links;
pub use fetch::{HttpFetcher, PageFetcher};
pub use queue::{CrawlTask, WorkQueue};
pub use runner::crawl;
