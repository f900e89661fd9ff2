use std::sync::Arc;
use std::sync::atomic::Ordering;
use anyhow::{ensure, Result};
use log2::*;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use url::Url;

use super::config::{CrawlerConfig, CrawlerConfigRef};
use super::fetch::PageFetcher;
use super::normalize::NormalizedUrl;
use super::scrape::extract_links;
use super::state::{CrawlerState, CrawlerStateRef};
use crate::error::CrawlError;

/// Why a task stopped before registering its url
#[derive(Debug)]
pub enum RejectReason {
    PageLimit,
    InvalidUrl(url::ParseError),
    OutOfScope,
}

/// How a single crawl task ended
#[derive(Debug)]
pub enum TaskOutcome {
    Rejected(RejectReason),
    RepeatVisit,
    FetchFailed(CrawlError),
    ExtractFailed(CrawlError),
    Expanded { discovered: usize },
}

/// Crawl from the state's seed until no work is left.
///
/// Runs `max_concurrency` workers over the shared queue; each worker handles
/// one url at a time, so that is also the bound on concurrent fetches.
pub async fn crawl<F: PageFetcher>(
    crawler_state_ref: CrawlerStateRef,
    crawler_cfg_ref: CrawlerConfigRef,
    fetcher: Arc<F>,
) -> Result<()> {
    ensure!(crawler_cfg_ref.max_concurrency > 0, "max_concurrency must be greater than 0");

    let mut handles: Vec<JoinHandle<()>> = Vec::new();

    for worker_id in 0..crawler_cfg_ref.max_concurrency {
        let state = Arc::clone(&crawler_state_ref);
        let config = Arc::clone(&crawler_cfg_ref);
        let fetcher = Arc::clone(&fetcher);

        let handle = tokio::spawn(async move {
            debug!("Worker {} started", worker_id);

            while let Some(task) = state.queue.next().await {
                let outcome = process_task(task.url(), &state, &config, fetcher.as_ref()).await;
                match &outcome {
                    TaskOutcome::Rejected(RejectReason::InvalidUrl(e)) => {
                        debug!("Worker {}: Skipping unparsable url {}: {}", worker_id, task.url(), e);
                    }
                    TaskOutcome::Rejected(reason) => {
                        debug!("Worker {}: Rejected {} ({:?})", worker_id, task.url(), reason);
                    }
                    TaskOutcome::RepeatVisit => {
                        debug!("Worker {}: Already visited {}", worker_id, task.url());
                    }
                    TaskOutcome::FetchFailed(e) => {
                        warn!("Worker {}: Failed to fetch {}: {}", worker_id, task.url(), e);
                    }
                    TaskOutcome::ExtractFailed(e) => {
                        warn!("Worker {}: Failed to extract links from {}: {}", worker_id, task.url(), e);
                    }
                    TaskOutcome::Expanded { discovered } => {
                        debug!("Worker {}: Expanded {} ({} links)", worker_id, task.url(), discovered);
                    }
                }
            }

            debug!("Worker {} finished", worker_id);
        });

        handles.push(handle);
    }

    for handle in handles {
        handle.await?;
    }

    Ok(())
}

/// Run one url through the crawl steps: ceiling, scope, dedup, fetch, extract
/// and queue the discovered links.
pub(crate) async fn process_task<F: PageFetcher>(
    raw_url: &str,
    state: &CrawlerState,
    config: &CrawlerConfig,
    fetcher: &F,
) -> TaskOutcome {
    // soft cap: workers racing past this check can still register pages
    if state.ledger.page_count().await >= config.max_pages {
        return TaskOutcome::Rejected(RejectReason::PageLimit);
    }

    let url = match Url::parse(raw_url) {
        Ok(url) => url,
        Err(e) => return TaskOutcome::Rejected(RejectReason::InvalidUrl(e)),
    };
    if !config.in_scope(&url) {
        return TaskOutcome::Rejected(RejectReason::OutOfScope);
    }

    let key = NormalizedUrl::from_url(&url);
    if !state.ledger.record_visit(key).await {
        return TaskOutcome::RepeatVisit;
    }

    info!("crawling page: {}", raw_url);
    let html = match fetcher.fetch(&url).await {
        Ok(html) => html,
        Err(e) => return TaskOutcome::FetchFailed(e),
    };
    state.pages_fetched.fetch_add(1, Ordering::Relaxed);

    let links = match extract_links(&html, &url) {
        Ok(links) => links,
        Err(e) => return TaskOutcome::ExtractFailed(e),
    };
    info!("Got urls: {:?}", links);

    let discovered = links.len();
    for link in links {
        state.queue.push(link).await;
    }

    if config.request_delay_ms > 0 {
        sleep(Duration::from_millis(config.request_delay_ms)).await;
    }

    TaskOutcome::Expanded { discovered }
}
