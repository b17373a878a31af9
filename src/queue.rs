//! Sequential bulk processing with per-item failure isolation.

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};

use log::{debug, warn};
use serde::{Serialize, Serializer};

use crate::ProcessingOptions;
use crate::error::SvgError;
use crate::process::{ProcessingResult, process};

/// An input the queue could not process.
#[derive(Debug, Serialize)]
pub struct FailedItem {
    pub input: String,
    #[serde(serialize_with = "serialize_display")]
    pub error: SvgError,
}

/// Outcomes of one drain, each list in processing order.
///
/// `successful` only ever holds [`ProcessingResult::Success`] values.
#[derive(Debug, Default, Serialize)]
pub struct BatchResult {
    pub successful: Vec<ProcessingResult>,
    pub failed: Vec<FailedItem>,
}

impl BatchResult {
    /// Number of items processed.
    pub fn len(&self) -> usize {
        self.successful.len() + self.failed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What happened to one item during a drain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    Succeeded,
    Failed,
}

fn serialize_display<S: Serializer>(error: &SvgError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// A FIFO queue of raw SVG strings, drained one item at a time.
///
/// At most one drain runs per queue. Items enqueued while a drain is in
/// flight join the tail of that drain instead of starting another one.
#[derive(Debug)]
pub struct BulkQueue {
    queue: VecDeque<String>,
    draining: bool,
    options: ProcessingOptions,
}

impl Default for BulkQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl BulkQueue {
    /// Create an empty queue that processes with optimization, comment
    /// removal and metadata removal enabled.
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            draining: false,
            options: ProcessingOptions {
                optimize: true,
                remove_comments: true,
                remove_metadata: true,
                ..ProcessingOptions::default()
            },
        }
    }

    /// Options every queued item is processed with.
    pub fn options(&self) -> &ProcessingOptions {
        &self.options
    }

    /// Items waiting to be processed.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn is_draining(&self) -> bool {
        self.draining
    }

    /// Append `items` and, if no drain is running, drain the queue.
    ///
    /// Returns `None` when a drain is already in flight; the items are then
    /// processed by that drain.
    pub fn enqueue<I, S>(&mut self, items: I) -> Option<BatchResult>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enqueue_with(items, |_, _, _| {})
    }

    /// Like [`enqueue`](Self::enqueue), calling `on_item` after each item
    /// with the queue, the processed input and its outcome.
    pub fn enqueue_with<I, S, F>(&mut self, items: I, on_item: F) -> Option<BatchResult>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnMut(&mut BulkQueue, &str, ItemOutcome),
    {
        let before = self.queue.len();
        self.queue.extend(items.into_iter().map(Into::into));
        debug!("enqueued {} svg(s)", self.queue.len() - before);

        if self.draining {
            return None;
        }
        self.drain_with(on_item)
    }

    /// Process queued items until the queue is empty.
    ///
    /// Returns `None` if called while a drain is already running.
    pub fn drain(&mut self) -> Option<BatchResult> {
        self.drain_with(|_, _, _| {})
    }

    /// Drain, calling `on_item` after each item.
    ///
    /// `on_item` may enqueue more items; they are processed by this same
    /// drain after everything already queued.
    pub fn drain_with<F>(&mut self, mut on_item: F) -> Option<BatchResult>
    where
        F: FnMut(&mut BulkQueue, &str, ItemOutcome),
    {
        if self.draining {
            return None;
        }
        self.draining = true;
        let mut guard = DrainGuard { queue: self };

        let mut results = BatchResult::default();
        while let Some(item) = guard.queue.queue.pop_front() {
            let outcome = match guard.queue.process_item(&item) {
                ProcessingResult::Failure { error, .. } => {
                    warn!("queued svg failed: {error}");
                    results.failed.push(FailedItem {
                        input: item.clone(),
                        error,
                    });
                    ItemOutcome::Failed
                }
                success => {
                    results.successful.push(success);
                    ItemOutcome::Succeeded
                }
            };
            on_item(&mut *guard.queue, &item, outcome);
        }

        drop(guard);
        debug!(
            "drain finished: {} succeeded, {} failed",
            results.successful.len(),
            results.failed.len()
        );
        Some(results)
    }

    fn process_item(&self, item: &str) -> ProcessingResult {
        isolate(item, || process(item, &self.options))
    }
}

/// Clears the draining flag when a drain ends, even by unwinding out of
/// the `on_item` callback.
struct DrainGuard<'a> {
    queue: &'a mut BulkQueue,
}

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        self.queue.draining = false;
    }
}

/// Run `run` for `item`, turning a panic into a failure.
fn isolate(item: &str, run: impl FnOnce() -> ProcessingResult) -> ProcessingResult {
    panic::catch_unwind(AssertUnwindSafe(run)).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "processing panicked".to_string());
        ProcessingResult::Failure {
            error: SvgError::Unknown(message),
            original_svg: item.to_string(),
        }
    })
}
