// src/main.rs
// =============================================================================
// Entry point: parse the CLI, run the crawl, write the JSON report, print a
// short summary. Exit code is 0 for every clean stop reason (including
// TIMEOUT and the *_LIMIT reasons -- those are expected outcomes, not
// failures); exit 2 for argument-parsing errors, setup errors, and
// RUNTIME_ERROR alike.
// =============================================================================

mod cli;
mod engine;
mod error;
mod extract;
mod host;
mod normalize;
mod queue;
mod report;
mod useragent;
mod worker;

use std::time::Duration;

use clap::Parser;
use url::Url;

use cli::Cli;
use engine::{CrawlOptions, StopReason};

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err}");
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    let seed_host = Url::parse(&cli.url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| "unknown-host".to_string());

    let opts = CrawlOptions {
        url: cli.url.clone(),
        timeout: cli.timeout.map(Duration::from_secs_f64),
        max_scanned: cli.max_scanned,
        max_found: cli.max_found,
        request_timeout: Duration::from_secs_f64(cli.request_timeout),
        workers_number: cli.workers_number,
        check_interval: Duration::from_secs_f64(cli.check_interval),
    };

    let crawl_report = engine::parse(opts).await?;
    let reason = crawl_report.reason;
    let report = report::Report::new(&cli.url, &crawl_report);

    let dir = std::env::current_dir()?;
    let path = report::write_report(&dir, &seed_host, &report)?;

    println!(
        "Scanned {} page(s), found {} link(s) in {:.2}s ({:?})",
        report.total_scanned, report.total_found, report.elapsed_time, reason
    );
    println!("Report written to {}", path.display());

    Ok(match reason {
        StopReason::RuntimeError => 2,
        _ => 0,
    })
}
