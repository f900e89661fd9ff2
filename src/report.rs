use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Write;
use std::path::Path;

use crate::crawler::NormalizedUrl;

/// One line of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub url: NormalizedUrl,
    pub links: usize,
}

/// Sort ledger entries by link count, ascending. Equal counts are ordered by url.
pub fn build_report(pages: HashMap<NormalizedUrl, usize>) -> Vec<ReportEntry> {
    let mut entries: Vec<ReportEntry> = pages
        .into_iter()
        .map(|(url, links)| ReportEntry { url, links })
        .collect();
    entries.sort_by(|a, b| a.links.cmp(&b.links).then_with(|| a.url.cmp(&b.url)));
    entries
}

pub fn render_report(entries: &[ReportEntry], base_url: &str) -> String {
    let mut out = format!("=== REPORT for {} ===\n", base_url);
    for entry in entries {
        let _ = writeln!(out, "Found {} internal links to {}", entry.links, entry.url);
    }
    out
}

pub fn print_report(entries: &[ReportEntry], base_url: &str) {
    print!("{}", render_report(entries, base_url));
}

pub fn write_json(path: &Path, entries: &[ReportEntry]) -> Result<()> {
    let json = serde_json::to_string_pretty(entries)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::normalize_url;

    fn ledger(pages: &[(&str, usize)]) -> HashMap<NormalizedUrl, usize> {
        pages
            .iter()
            .map(|(url, count)| (normalize_url(url).unwrap(), *count))
            .collect()
    }

    #[test]
    fn test_sorted_ascending_by_count() {
        let entries = build_report(ledger(&[
            ("https://site.test/p1", 3),
            ("https://site.test/p2", 1),
            ("https://site.test/p3", 2),
        ]));
        let urls: Vec<&str> = entries.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(urls, ["https://site.test/p2", "https://site.test/p3", "https://site.test/p1"]);
    }

    #[test]
    fn test_ties_ordered_by_url() {
        let entries = build_report(ledger(&[
            ("https://site.test/zeta", 1),
            ("https://site.test/alpha", 1),
            ("https://site.test/mid", 1),
        ]));
        let urls: Vec<&str> = entries.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(urls, ["https://site.test/alpha", "https://site.test/mid", "https://site.test/zeta"]);
    }

    #[test]
    fn test_render_report() {
        let entries = build_report(ledger(&[("https://site.test", 1), ("https://site.test/about", 4)]));
        let rendered = render_report(&entries, "https://site.test");
        assert_eq!(
            rendered,
            "=== REPORT for https://site.test ===\n\
             Found 1 internal links to https://site.test\n\
             Found 4 internal links to https://site.test/about\n"
        );
    }

    #[test]
    fn test_empty_report_has_only_header() {
        assert_eq!(render_report(&[], "https://site.test"), "=== REPORT for https://site.test ===\n");
    }

    #[test]
    fn test_write_json() -> Result<()> {
        let entries = build_report(ledger(&[("https://site.test/a", 2)]));
        let path = std::env::temp_dir().join(format!("site_crawler_report_{}.json", std::process::id()));
        write_json(&path, &entries)?;
        let written: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        std::fs::remove_file(&path)?;
        assert_eq!(written, serde_json::json!([{ "url": "https://site.test/a", "links": 2 }]));
        Ok(())
    }
}
