use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use tokio::sync::Mutex;
use url::Url;

use super::normalize::NormalizedUrl;
use super::queue::WorkQueue;

/// How many times each page was linked to and scheduled, first visit included.
#[derive(Default)]
pub struct VisitLedger {
    pages: Mutex<HashMap<NormalizedUrl, usize>>,
}

impl VisitLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more visit of `key`. Returns true only for the first one.
    pub async fn record_visit(&self, key: NormalizedUrl) -> bool {
        let mut pages = self.pages.lock().await;
        match pages.entry(key) {
            Entry::Occupied(mut entry) => {
                *entry.get_mut() += 1;
                false
            }
            Entry::Vacant(entry) => {
                entry.insert(1);
                true
            }
        }
    }

    /// Number of distinct pages registered so far
    pub async fn page_count(&self) -> usize {
        self.pages.lock().await.len()
    }

    pub async fn snapshot(&self) -> HashMap<NormalizedUrl, usize> {
        self.pages.lock().await.clone()
    }
}

/// Current state of the crawler
pub struct CrawlerState {
    /// Visit counts per normalized url
    pub ledger: VisitLedger,
    /// Raw urls waiting to be crawled
    pub queue: WorkQueue,
    /// Pages whose body was fetched successfully
    pub pages_fetched: AtomicUsize,
}

impl CrawlerState {
    pub fn new(starting_url: Url) -> Self {
        Self {
            ledger: VisitLedger::new(),
            queue: WorkQueue::with_seed(starting_url.to_string()),
            pages_fetched: AtomicUsize::new(0),
        }
    }
}

pub type CrawlerStateRef = Arc<CrawlerState>;
