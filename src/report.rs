// src/report.rs
// =============================================================================
// The report shape (spec §6) and the act of writing it to
// `<seed_host> <YYYY-MM-DD HH-MM-SS>.json` in the current directory.
// Mirrors parser/reports.py's write_report.
// =============================================================================

use std::io;
use std::path::Path;

use serde::Serialize;
use url::Url;

use crate::engine::{CrawlReport, StopReason};

#[derive(Debug, Serialize)]
pub struct Report {
    pub start_url: String,
    pub total_scanned: usize,
    pub total_found: usize,
    pub elapsed_time: f64,
    pub stop_reason: StopReason,
    pub scanned: Vec<String>,
    pub found: Vec<String>,
}

impl Report {
    pub fn new(start_url: &str, report: &CrawlReport) -> Self {
        let mut found: Vec<String> = report.found.iter().map(Url::to_string).collect();
        let mut scanned: Vec<String> = report.scanned.iter().map(Url::to_string).collect();
        found.sort();
        scanned.sort();

        Report {
            start_url: start_url.to_string(),
            total_scanned: scanned.len(),
            total_found: found.len(),
            elapsed_time: (report.elapsed.as_secs_f64() * 100.0).round() / 100.0,
            stop_reason: report.reason,
            scanned,
            found,
        }
    }
}

/// Write the report as 4-space-indented JSON to
/// `<dir>/<seed_host> <YYYY-MM-DD HH-MM-SS>.json`.
pub fn write_report(
    dir: &Path,
    seed_host: &str,
    report: &Report,
) -> io::Result<std::path::PathBuf> {
    let filename = format!(
        "{seed_host} {}.json",
        chrono::Local::now().format("%Y-%m-%d %H-%M-%S")
    );
    let path = dir.join(filename);

    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    serde::Serialize::serialize(report, &mut serializer).map_err(io::Error::other)?;

    std::fs::write(&path, buf)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::CrawlReport;
    use std::collections::HashSet;
    use std::time::Duration;

    #[test]
    fn report_fields_match_shape() {
        let crawl = CrawlReport {
            found: HashSet::from([
                Url::parse("https://example.com/b").unwrap(),
                Url::parse("https://example.com/a").unwrap(),
            ]),
            scanned: HashSet::from([Url::parse("https://example.com/a").unwrap()]),
            reason: StopReason::AllProcessed,
            elapsed: Duration::from_millis(1234),
        };
        let report = Report::new("https://example.com/a", &crawl);

        assert_eq!(report.total_found, 2);
        assert_eq!(report.total_scanned, 1);
        assert_eq!(report.elapsed_time, 1.23);
        assert_eq!(
            report.found,
            vec!["https://example.com/a", "https://example.com/b"]
        );
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"stop_reason\":\"ALL_PROCESSED\""));
    }

    #[test]
    fn write_report_produces_readable_json() {
        let crawl = CrawlReport {
            found: HashSet::from([Url::parse("https://example.com/").unwrap()]),
            scanned: HashSet::new(),
            reason: StopReason::Timeout,
            elapsed: Duration::from_secs(1),
        };
        let report = Report::new("https://example.com/", &crawl);
        let dir = std::env::temp_dir();
        let path = write_report(&dir, "example.com", &report).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("{\n    "));
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed["stop_reason"], "TIMEOUT");
        std::fs::remove_file(&path).unwrap();
    }
}
