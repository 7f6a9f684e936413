//! The `EventSink` trait and the stock FIFO `EventLog`.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::Event;

// ── EventSink ─────────────────────────────────────────────────────────────────

/// An append-only sink for lifecycle events.
///
/// `record` takes `&self` so a sink can be shared behind an `Arc` by the
/// scheduler and its tunnels.  Implementations must preserve the real-time
/// order of `record` calls; in practice every call is made while the caller
/// holds the scheduler lock, so calls are already serialized and the order
/// is well-defined.
pub trait EventSink: Send + Sync {
    /// Append one event.
    fn record(&self, event: Event);
}

/// An [`EventSink`] that discards everything.  Use in tests and benchmarks
/// that don't inspect the event stream.
pub struct NoopSink;

impl EventSink for NoopSink {
    fn record(&self, _event: Event) {}
}

// ── EventLog ──────────────────────────────────────────────────────────────────

/// FIFO event log: events come out of [`pop_head`]/[`drain`] in exactly the
/// order they were recorded.
///
/// The internal mutex makes the log safe to share between worker threads on
/// its own; it is never held across any other lock.
///
/// [`pop_head`]: EventLog::pop_head
/// [`drain`]: EventLog::drain
#[derive(Default)]
pub struct EventLog {
    inner: Mutex<VecDeque<Event>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return the oldest recorded event, or `None` if empty.
    pub fn pop_head(&self) -> Option<Event> {
        self.inner.lock().expect("event log lock poisoned").pop_front()
    }

    /// Drain the whole log in recorded order, leaving it empty.
    pub fn drain(&self) -> Vec<Event> {
        let mut queue = self.inner.lock().expect("event log lock poisoned");
        queue.drain(..).collect()
    }

    /// Number of events currently held.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("event log lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for EventLog {
    fn record(&self, event: Event) {
        self.inner
            .lock()
            .expect("event log lock poisoned")
            .push_back(event);
    }
}
