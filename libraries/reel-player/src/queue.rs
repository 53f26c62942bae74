//! Sample hand-off queues
//!
//! One multi-producer / single-consumer queue per sample kind. Producers
//! are decoder threads and never block; the consumer pulls at its own
//! cadence (independent of the tick rate) and must tolerate an empty
//! queue. Backpressure is provided by pool reuse, not by bounding the
//! channel.

use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::Arc;

/// MPSC hand-off queue for sealed samples.
pub struct SampleQueue<T> {
    tx: Sender<Arc<T>>,
    rx: Receiver<Arc<T>>,
}

impl<T> SampleQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        SampleQueue { tx, rx }
    }

    /// A producer handle for the callback sink.
    pub fn sender(&self) -> Sender<Arc<T>> {
        self.tx.clone()
    }

    /// Take every queued sample, in arrival order, without blocking.
    pub fn drain(&self) -> Vec<Arc<T>> {
        self.rx.try_iter().collect()
    }

    /// Discard every queued sample.
    pub fn flush(&self) {
        while self.rx.try_recv().is_ok() {}
    }

    /// Number of samples waiting.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// True when no samples are waiting.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

impl<T> Default for SampleQueue<T> {
    fn default() -> Self {
        SampleQueue::new()
    }
}
