// src/queue.rs
// =============================================================================
// FIFO work queue with at-most-once admission per run and a completion
// signal, shared by every fetch worker and the completion watcher.
//
// Admission is permanent: once a URL has been `put`, it stays in `admitted`
// even after `get()` hands it out, so a redirect loop or a link back to an
// already-scanned page can never re-enqueue it. `join()` unblocks once the
// outstanding-work counter (incremented on each newly-admitted `put`,
// decremented by `task_done`) reaches zero — mirrors the original's
// `asyncio.Queue`-backed `UniqueQueue` (parser/web.py).
// =============================================================================

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use tokio::sync::Notify;
use url::Url;

struct Inner {
    fifo: VecDeque<Url>,
    admitted: HashSet<Url>,
    outstanding: usize,
}

pub struct UniqueQueue {
    inner: Mutex<Inner>,
    item_available: Notify,
    drained: Notify,
}

impl UniqueQueue {
    pub fn new() -> Self {
        UniqueQueue {
            inner: Mutex::new(Inner {
                fifo: VecDeque::new(),
                admitted: HashSet::new(),
                outstanding: 0,
            }),
            item_available: Notify::new(),
            drained: Notify::new(),
        }
    }

    /// Admit `item` if it hasn't been seen before this run. No-op otherwise.
    pub fn put(&self, item: Url) {
        let mut inner = self.inner.lock().expect("queue mutex poisoned");
        if inner.admitted.insert(item.clone()) {
            inner.fifo.push_back(item);
            inner.outstanding += 1;
            drop(inner);
            self.item_available.notify_one();
        }
    }

    /// Block until an item is available, then return the oldest one.
    /// The item remains in `admitted` — admission is permanent per run.
    pub async fn get(&self) -> Url {
        loop {
            let notified = self.item_available.notified();
            {
                let mut inner = self.inner.lock().expect("queue mutex poisoned");
                if let Some(item) = inner.fifo.pop_front() {
                    return item;
                }
            }
            notified.await;
        }
    }

    /// Mark one unit of outstanding work as done (one call per `get()`).
    pub fn task_done(&self) {
        let mut inner = self.inner.lock().expect("queue mutex poisoned");
        inner.outstanding -= 1;
        if inner.outstanding == 0 {
            drop(inner);
            self.drained.notify_waiters();
        }
    }

    /// Block until the outstanding-work counter reaches zero: every
    /// admitted item has been matched by a `task_done`.
    pub async fn join(&self) {
        loop {
            let notified = self.drained.notified();
            {
                let inner = self.inner.lock().expect("queue mutex poisoned");
                if inner.outstanding == 0 {
                    return;
                }
            }
            notified.await;
        }
    }

    /// Current FIFO length. Observational only.
    pub fn size(&self) -> usize {
        self.inner.lock().expect("queue mutex poisoned").fifo.len()
    }
}

impl Default for UniqueQueue {
    fn default() -> Self {
        Self::new()
    }
}
