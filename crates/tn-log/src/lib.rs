//! `tn-log` — lifecycle event model and append-only event sink.
//!
//! The scheduler emits one [`Event`] per admission attempt, success, failure,
//! and exit.  Events are recorded through the [`EventSink`] trait; the stock
//! [`EventLog`] implementation preserves FIFO order so the stream can be
//! replayed after a run for offline verification (`tn-sim::verify`).
//!
//! | Module   | Contents                                   |
//! |----------|--------------------------------------------|
//! | [`event`]| `Event`, `EventKind`                       |
//! | [`sink`] | `EventSink`, `EventLog`, `NoopSink`        |
//! | [`csv`]  | `write_events` — CSV export of a drained log |

pub mod csv;
pub mod error;
pub mod event;
pub mod sink;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use csv::write_events;
pub use error::{LogError, LogResult};
pub use event::{Event, EventKind};
pub use sink::{EventLog, EventSink, NoopSink};
