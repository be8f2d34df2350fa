// src/cli.rs
// =============================================================================
// Command-line surface: one command, a positional seed URL plus the crawl
// options as long flags. Mirrors parser/cli.py's single click command.
// =============================================================================

use clap::Parser;

use crate::engine::{DEFAULT_CHECK_INTERVAL, DEFAULT_REQUEST_TIMEOUT, DEFAULT_WORKERS_NUMBER};

#[derive(Parser, Debug)]
#[command(
    name = "sitecrawl",
    version = "0.1.0",
    about = "Bounded, single-host breadth-first web crawler",
    long_about = "sitecrawl crawls a website starting from a seed URL, staying on the \
                  same site, until it runs out of pages, hits a limit, or times out, \
                  then writes a JSON report of every URL found and scanned."
)]
pub struct Cli {
    /// Seed URL to crawl (e.g., https://example.com)
    pub url: String,

    /// Total timeout for the whole crawl, in seconds
    #[arg(long)]
    pub timeout: Option<f64>,

    /// Soft upper bound on the number of scanned URLs
    #[arg(long)]
    pub max_scanned: Option<usize>,

    /// Soft upper bound on the number of found URLs
    #[arg(long)]
    pub max_found: Option<usize>,

    /// Per-request timeout, in seconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs_f64())]
    pub request_timeout: f64,

    /// Number of workers scanning URLs concurrently
    #[arg(long, default_value_t = DEFAULT_WORKERS_NUMBER)]
    pub workers_number: usize,

    /// Interval for checking the max_scanned/max_found limits, in seconds
    #[arg(long, default_value_t = DEFAULT_CHECK_INTERVAL.as_secs_f64())]
    pub check_interval: f64,
}
