use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Mutex, Notify};

/// Pending crawl work plus a count of tasks that are queued or still running.
///
/// The crawl is over when that count reaches zero: no task is running, so
/// nothing can push more work.
pub struct WorkQueue {
    pending: Mutex<VecDeque<String>>,
    outstanding: AtomicUsize,
    notify: Notify,
}

impl WorkQueue {
    pub fn with_seed(seed: String) -> Self {
        Self {
            pending: Mutex::new(VecDeque::from([seed])),
            outstanding: AtomicUsize::new(1),
            notify: Notify::new(),
        }
    }

    /// Queue a raw url. Counted as outstanding before any worker can see it.
    pub async fn push(&self, url: String) {
        self.outstanding.fetch_add(1, Ordering::SeqCst);
        self.pending.lock().await.push_back(url);
        self.notify.notify_one();
    }

    /// Waits for the next task. `None` once all work is done.
    pub async fn next(&self) -> Option<CrawlTask<'_>> {
        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            // register before checking so a wakeup between the checks and the await is not lost
            notified.as_mut().enable();

            let next_url = self.pending.lock().await.pop_front();
            if let Some(url) = next_url {
                return Some(CrawlTask { url, queue: self });
            }
            if self.outstanding.load(Ordering::SeqCst) == 0 {
                return None;
            }
            notified.await;
        }
    }

    /// Tasks queued or in progress
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }

    fn complete(&self) {
        if self.outstanding.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.notify.notify_waiters();
        }
    }
}

/// One raw url taken off the queue. Dropping it marks the work as done.
pub struct CrawlTask<'a> {
    url: String,
    queue: &'a WorkQueue,
}

impl CrawlTask<'_> {
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for CrawlTask<'_> {
    fn drop(&mut self) {
        self.queue.complete();
    }
}
