use anyhow::Context;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

use crate::crawler::LINK_REQUEST_TIMEOUT_SEC;

/// Log levels as defined in log2 crate
#[derive(Debug, Serialize, Deserialize, Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// This struct receives all program arguments while CrawlerConfig
/// describes only the crawler
#[derive(Parser, Debug, Serialize, Deserialize)]
#[command(name = "crawler", author, version, about = "Count internal links across every page of a site", long_about = None)]
pub struct Config {
    /// Starting URL; only pages on its host are crawled
    #[arg(value_name = "url")]
    pub url: String,
    /// Number of pages crawled at the same time
    #[arg(value_name = "maxConcurrency")]
    pub max_concurrency: usize,
    /// Stop crawling new pages once this many distinct pages were found
    #[arg(value_name = "maxPages")]
    pub max_pages: usize,
    /// Delay after each crawled page in milliseconds
    #[arg(long, default_value = "0")]
    pub request_delay: u64,
    /// Request timeout in seconds
    #[arg(long, default_value_t = LINK_REQUEST_TIMEOUT_SEC)]
    pub timeout: u64,
    /// Also write the report as JSON to this file
    #[arg(short, long)]
    pub output_file: Option<PathBuf>,
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", value_enum)]
    pub log_level: LogLevel,
}

impl Config {
    /// Parse the process arguments. Bad input exits with code 1 and the usage.
    pub fn new() -> Self {
        match Self::try_parse() {
            Ok(cfg) => cfg,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
            Err(e) => {
                let _ = e.print();
                std::process::exit(1);
            }
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let url = self.base_url()?;
        if url.host_str().is_none() {
            anyhow::bail!("url must contain a host: {}", self.url);
        }
        if self.max_concurrency == 0 {
            anyhow::bail!("maxConcurrency (argument 2) must be greater than 0");
        }
        Ok(())
    }

    /// The starting url with trailing slashes removed
    pub fn base_url_str(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    pub fn base_url(&self) -> anyhow::Result<Url> {
        Url::parse(self.base_url_str()).with_context(|| format!("error parsing url: {}", self.url))
    }
}

/// Usage line printed next to argument errors
pub fn usage() -> String {
    Config::command().render_usage().to_string()
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, clap::Error> {
        Config::try_parse_from(std::iter::once("crawler").chain(args.iter().copied()))
    }

    #[test]
    fn test_parses_positional_arguments() -> Result<(), Box<dyn std::error::Error>> {
        let cfg = parse(&["https://example.com//", "4", "25"])?;
        assert_eq!(cfg.base_url_str(), "https://example.com");
        assert_eq!(cfg.max_concurrency, 4);
        assert_eq!(cfg.max_pages, 25);
        assert_eq!(cfg.request_delay, 0);
        assert_eq!(cfg.timeout, LINK_REQUEST_TIMEOUT_SEC);
        assert!(cfg.validate().is_ok());
        Ok(())
    }

    #[test]
    fn test_wrong_argument_count() {
        assert!(parse(&["https://example.com", "4"]).is_err());
        assert!(parse(&["https://example.com", "4", "10", "extra"]).is_err());
    }

    #[test]
    fn test_non_integer_limits() {
        assert!(parse(&["https://example.com", "four", "10"]).is_err());
        assert!(parse(&["https://example.com", "4", "ten"]).is_err());
        assert!(parse(&["https://example.com", "4", "-1"]).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_input() -> Result<(), Box<dyn std::error::Error>> {
        assert!(parse(&["not a url", "4", "10"])?.validate().is_err());
        assert!(parse(&["https://example.com", "0", "10"])?.validate().is_err());
        Ok(())
    }
}
