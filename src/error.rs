// src/error.rs
// =============================================================================
// The crawl engine's error taxonomy. Per-URL transient/structural failures
// never become a `CrawlError` -- they're logged and swallowed inside the
// worker. An unexpected worker/watcher failure instead flips the stop reason
// to RUNTIME_ERROR (see engine::watch_for_worker_failures) rather than
// aborting the whole crawl, so this type only covers setup failures.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlError {
    /// The seed URL could not be parsed as an absolute HTTP(S) URL.
    #[error("invalid seed url '{url}': {source}")]
    InvalidSeed {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}
