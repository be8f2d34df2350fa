// src/engine.rs
// =============================================================================
// The crawl supervisor: seeds the queue, spawns the worker pool and the
// three limit watchers, arbitrates the first stop reason to fire, enforces
// the global deadline, and cancels everything else once a reason is
// settled. Mirrors `parse()` in the original parser/web.py, which expresses
// the same arbitration with an `asyncio.TaskGroup` and a sentinel exception;
// here "first signal wins, cancel the rest" is a `Notify`-backed one-shot
// instead, per spec's guidance to prefer that over raising to unwind.
// =============================================================================

use std::collections::HashSet;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::{Duration, Instant};

use reqwest::Client;
use serde::Serialize;
use tokio::sync::{Mutex, Notify};
use tokio::task::JoinSet;
use tracing::{info, warn};
use url::Url;

use crate::error::CrawlError;
use crate::queue::UniqueQueue;
use crate::worker::{self, WorkerContext};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_WORKERS_NUMBER: usize = 5;
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_millis(100);

/// Single label explaining why a crawl ended. Exactly one is reported per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StopReason {
    AllProcessed,
    Timeout,
    FoundLimit,
    ScannedLimit,
    RuntimeError,
}

#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub url: String,
    pub timeout: Option<Duration>,
    pub max_scanned: Option<usize>,
    pub max_found: Option<usize>,
    pub request_timeout: Duration,
    pub workers_number: usize,
    pub check_interval: Duration,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        CrawlOptions {
            url: String::new(),
            timeout: None,
            max_scanned: None,
            max_found: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            workers_number: DEFAULT_WORKERS_NUMBER,
            check_interval: DEFAULT_CHECK_INTERVAL,
        }
    }
}

pub struct CrawlReport {
    pub found: HashSet<Url>,
    pub scanned: HashSet<Url>,
    pub reason: StopReason,
    pub elapsed: Duration,
}

/// First-write-wins stop signal shared by the supervisor's watchers.
struct Stopper {
    reason: StdMutex<Option<StopReason>>,
    notify: Notify,
}

impl Stopper {
    fn new() -> Self {
        Stopper {
            reason: StdMutex::new(None),
            notify: Notify::new(),
        }
    }

    /// Set the reason if none has been set yet. Later calls are discarded.
    fn fire(&self, reason: StopReason) {
        let mut slot = self.reason.lock().expect("stopper mutex poisoned");
        if slot.is_none() {
            *slot = Some(reason);
            drop(slot);
            self.notify.notify_waiters();
        }
    }

    fn current(&self) -> Option<StopReason> {
        *self.reason.lock().expect("stopper mutex poisoned")
    }

    async fn wait(&self) -> StopReason {
        loop {
            let notified = self.notify.notified();
            if let Some(reason) = self.current() {
                return reason;
            }
            notified.await;
        }
    }
}

/// Crawl `opts.url` breadth-first within its own site until a stop
/// condition fires, then return everything discovered and scanned.
#[tracing::instrument(skip(opts), fields(url = %opts.url))]
pub async fn parse(opts: CrawlOptions) -> Result<CrawlReport, CrawlError> {
    let seed = Url::parse(&opts.url).map_err(|source| CrawlError::InvalidSeed {
        url: opts.url.clone(),
        source,
    })?;

    let found = Arc::new(Mutex::new(HashSet::from([seed.clone()])));
    let scanned = Arc::new(Mutex::new(HashSet::new()));
    let queue = Arc::new(UniqueQueue::new());
    queue.put(seed);

    let started_at = Instant::now();

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(CrawlError::ClientBuild)?;

    let worker_ctx = Arc::new(WorkerContext {
        client,
        queue: queue.clone(),
        found: found.clone(),
        scanned: scanned.clone(),
        request_timeout: opts.request_timeout,
    });

    let stopper = Arc::new(Stopper::new());

    let mut workers: JoinSet<()> = JoinSet::new();
    for i in 1..=opts.workers_number {
        let ctx = worker_ctx.clone();
        workers.spawn(worker::run(format!("worker-{i}"), ctx));
    }

    let watchdog = tokio::spawn(watch_for_worker_failures(workers, stopper.clone()));

    let completion_watcher = tokio::spawn({
        let queue = queue.clone();
        let stopper = stopper.clone();
        async move {
            queue.join().await;
            info!("all urls have been processed");
            stopper.fire(StopReason::AllProcessed);
        }
    });

    let found_watcher = tokio::spawn(watch_numeric_limit(
        "found",
        found.clone(),
        opts.max_found,
        opts.check_interval,
        StopReason::FoundLimit,
        stopper.clone(),
    ));

    let scanned_watcher = tokio::spawn(watch_numeric_limit(
        "scanned",
        scanned.clone(),
        opts.max_scanned,
        opts.check_interval,
        StopReason::ScannedLimit,
        stopper.clone(),
    ));

    let reason = match opts.timeout {
        Some(deadline) => match tokio::time::timeout(deadline, stopper.wait()).await {
            Ok(reason) => reason,
            Err(_) => {
                info!("got timeout limit");
                stopper.fire(StopReason::Timeout);
                stopper.current().unwrap_or(StopReason::Timeout)
            }
        },
        None => stopper.wait().await,
    };

    watchdog.abort();
    completion_watcher.abort();
    found_watcher.abort();
    scanned_watcher.abort();

    let elapsed = started_at.elapsed();
    let found = found.lock().await.clone();
    let scanned = scanned.lock().await.clone();

    Ok(CrawlReport {
        found,
        scanned,
        reason,
        elapsed,
    })
}

/// Watch a shared count against an optional limit, firing `reason` once
/// `collection.len() >= limit`. A `None` limit means "never fires".
async fn watch_numeric_limit(
    name: &'static str,
    collection: Arc<Mutex<HashSet<Url>>>,
    limit: Option<usize>,
    check_interval: Duration,
    reason: StopReason,
    stopper: Arc<Stopper>,
) {
    let Some(limit) = limit else { return };
    loop {
        if collection.lock().await.len() >= limit {
            info!(limit_name = name, limit, "got limit");
            stopper.fire(reason);
            return;
        }
        tokio::time::sleep(check_interval).await;
    }
}

/// Abort-aware watchdog: an unexpected worker panic becomes RUNTIME_ERROR,
/// but a worker resolving because the supervisor cancelled it does not.
async fn watch_for_worker_failures(mut workers: JoinSet<()>, stopper: Arc<Stopper>) {
    while let Some(result) = workers.join_next().await {
        if let Err(join_error) = result {
            if !join_error.is_cancelled() {
                warn!(error = %join_error, "worker task failed unexpectedly");
                stopper.fire(StopReason::RuntimeError);
            }
        }
    }
}
