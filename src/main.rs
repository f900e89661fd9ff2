use log2::*;
use anyhow::Result;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Instant;

use site_crawler::{config, crawler, report};

/// Indicates start time of a project, lazily initialized
pub static START_TIME: once_cell::sync::Lazy<Instant> = once_cell::sync::Lazy::new(Instant::now);

#[tokio::main]
async fn main() -> Result<()> {
    let _ = *START_TIME;
    let cfg = config::Config::new();
    if let Err(e) = cfg.validate() {
        eprintln!("{:#}", e);
        eprintln!("{}", config::usage());
        std::process::exit(1);
    }
    let _log2 = stdout()
        .module(true) // include module name
        .module_with_line(true) // include line number from module
        .module_filter(|module| module.starts_with("site_crawler") || module.starts_with("crawler"))
        .compress(false)
        .level(cfg.log_level.to_string())
        .start();

    let start_url = cfg.base_url()?;
    info!(
        "starting crawl of: {} with maxConcurrency: {} and maxPages: {}",
        cfg.base_url_str(),
        cfg.max_concurrency,
        cfg.max_pages
    );

    let crawler_config = Arc::new(
        crawler::CrawlerConfig::new(start_url.clone())
            .with_max_concurrency(cfg.max_concurrency)
            .with_max_pages(cfg.max_pages)
            .with_request_delay(cfg.request_delay)
            .with_request_timeout(cfg.timeout),
    );
    let fetcher = Arc::new(crawler::HttpFetcher::new(&crawler_config)?);

    let state = Arc::new(crawler::CrawlerState::new(start_url));

    // state is cloned because the ledger is read after the crawl
    match crawler::crawl(state.clone(), crawler_config, fetcher).await {
        Ok(_) => {
            let fetched = state.pages_fetched.load(Ordering::Relaxed);
            info!("Done... fetched {} pages in {:.2?}", fetched, START_TIME.elapsed());

            let entries = report::build_report(state.ledger.snapshot().await);
            report::print_report(&entries, cfg.base_url_str());

            if let Some(path) = &cfg.output_file {
                report::write_json(path, &entries)?;
                info!("Report written to {:?}", path);
            }
        }
        Err(e) => {
            error!("Crawling failed: {}", e);
        }
    }

    Ok(())
}
