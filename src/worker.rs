// src/worker.rs
// =============================================================================
// A fetch worker: pulls URLs off the shared queue forever, fetches each with
// redirects disabled, classifies the response, and re-enqueues whatever
// normalizes cleanly. Mirrors `work()` in the original parser/web.py.
//
// State machine per URL: enqueued -> in-flight -> {scanned, abandoned},
// terminal either way. `task_done()` is called exactly once per `get()` no
// matter which branch is taken.
// =============================================================================

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use url::Url;

use crate::host::Host;
use crate::normalize::normalize;
use crate::queue::UniqueQueue;
use crate::{extract, useragent};

pub struct WorkerContext {
    pub client: Client,
    pub queue: Arc<UniqueQueue>,
    pub found: Arc<Mutex<HashSet<Url>>>,
    pub scanned: Arc<Mutex<HashSet<Url>>>,
    pub request_timeout: Duration,
}

/// Run one worker's unbounded fetch loop. Only returns when the task is
/// cancelled (aborted) by the supervisor.
#[tracing::instrument(skip(ctx), fields(worker = %name))]
pub async fn run(name: String, ctx: Arc<WorkerContext>) {
    loop {
        let url = ctx.queue.get().await;
        debug!(%url, "started scanning");

        process_one(&ctx, &url).await;

        ctx.queue.task_done();
    }
}

async fn process_one(ctx: &WorkerContext, url: &Url) {
    let base_host = Host::full(url.host_str().unwrap_or_default());

    let request = ctx
        .client
        .get(url.clone())
        .header(reqwest::header::USER_AGENT, useragent::random())
        .timeout(ctx.request_timeout);

    let response = match request.send().await {
        Ok(response) => response,
        Err(err) => {
            warn!(%url, error = %err, "request failed, abandoning url");
            return;
        }
    };

    let status = response.status();

    if status == StatusCode::MOVED_PERMANENTLY || status == StatusCode::FOUND {
        mark(&ctx.scanned, url.clone()).await;
        mark(&ctx.found, url.clone()).await;

        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        info!(%url, %status, %location, "got redirect");

        if let Some(redirect) = normalize(url, &base_host, location) {
            mark(&ctx.found, redirect.clone()).await;
            ctx.queue.put(redirect);
        } else {
            debug!(%url, %location, "redirect target rejected");
        }
        return;
    }

    // A response was received: the body read is about to begin, so this URL
    // counts as scanned from here on even if the read itself fails partway
    // through or the page turns out not to be a 2xx.
    mark(&ctx.scanned, url.clone()).await;

    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => {
            warn!(%url, error = %err, "failed reading response body");
            return;
        }
    };

    if !status.is_success() {
        debug!(%url, %status, "non-2xx response, no links extracted");
        return;
    }

    let raw_hrefs = extract::extract_hrefs(&body);
    let mut new_links = 0;
    for raw_href in &raw_hrefs {
        if let Some(link) = normalize(url, &base_host, raw_href) {
            if mark(&ctx.found, link.clone()).await {
                new_links += 1;
            }
            ctx.queue.put(link);
        }
    }
    info!(%url, raw = raw_hrefs.len(), new_links, "page scanned");
}

/// Insert `item` into a shared set, returning whether it was newly inserted.
async fn mark(set: &Mutex<HashSet<Url>>, item: Url) -> bool {
    set.lock().await.insert(item)
}
