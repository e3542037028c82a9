//! Windowed concurrent scheduling for context generation.

use std::future::Future;

use futures::future::join_all;
use tracing::debug;

/// Runs per-chunk tasks in fixed-size concurrent windows.
///
/// Items are partitioned into consecutive windows of `batch_size` (the
/// last may be smaller). All tasks in a window run concurrently and the
/// whole window is awaited before the next one starts, bounding in-flight
/// model calls to `batch_size` and giving natural backpressure against a
/// rate-limited model.
///
/// Output order is the input order: each task's result lands at its item's
/// position regardless of completion order, and windows never overlap.
pub struct BatchScheduler {
    batch_size: usize,
}

impl BatchScheduler {
    /// Create a scheduler with the given window size.
    pub fn new(batch_size: usize) -> Self {
        Self { batch_size }
    }

    /// Get the window size.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Run one task per item, `batch_size` at a time, preserving order.
    ///
    /// The task receives each item's global index alongside the item.
    pub async fn run<I, T, F, Fut>(&self, items: Vec<I>, task: F) -> Vec<T>
    where
        F: Fn(usize, I) -> Fut,
        Fut: Future<Output = T>,
    {
        let total = items.len();
        let mut output = Vec::with_capacity(total);
        let mut remaining = items.into_iter();
        let mut window_start = 0;

        while window_start < total {
            let window: Vec<I> = remaining.by_ref().take(self.batch_size).collect();
            let window_len = window.len();

            debug!(
                window_start,
                window_len,
                total,
                "Processing window"
            );

            let tasks = window
                .into_iter()
                .enumerate()
                .map(|(offset, item)| task(window_start + offset, item));

            output.extend(join_all(tasks).await);
            window_start += window_len;
        }

        output
    }
}
