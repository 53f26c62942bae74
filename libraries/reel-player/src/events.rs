//! Event bridge
//!
//! Decoder threads push opaque `NativeEvent` tags into a multi-producer /
//! single-consumer queue; `Player::tick` drains it exactly once per tick,
//! processing every queued event in arrival order before re-deriving the
//! player state. Consumer-facing `MediaEvent`s go out through the
//! `EventSink` the player was constructed with.

use crossbeam_channel::{unbounded, Receiver, Sender};
use reel_core::{MediaEvent, NativeEvent, NativeEventSink};
use tracing::trace;

/// Consumer-facing sink for coarse playback events.
pub trait EventSink: Send + Sync {
    /// Receive one playback event, on the tick thread.
    fn receive(&self, event: MediaEvent);
}

/// MPSC funnel for native decoder events.
///
/// `notify` is invoked from decoder threads and never blocks; `drain` is
/// called from the tick and preserves arrival order.
pub struct EventQueue {
    tx: Sender<NativeEvent>,
    rx: Receiver<NativeEvent>,
}

impl EventQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        EventQueue { tx, rx }
    }

    /// Take every queued event, in arrival order.
    pub fn drain(&self) -> Vec<NativeEvent> {
        self.rx.try_iter().collect()
    }

    /// Number of events waiting.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// True when no events are waiting.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        EventQueue::new()
    }
}

impl NativeEventSink for EventQueue {
    fn notify(&self, event: NativeEvent) {
        trace!(?event, "native event");
        self.tx.send(event).ok();
    }
}
