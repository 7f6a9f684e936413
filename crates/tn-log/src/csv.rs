//! CSV export of a drained event log.
//!
//! Writes one file with a header row and one row per event, in recorded
//! order.  Useful for inspecting a run in a spreadsheet or diffing two runs.

use std::path::Path;

use serde::Serialize;

use crate::{Event, EventKind, LogResult};

/// Flat serializable projection of one [`Event`].
#[derive(Debug, Clone, Serialize)]
struct EventRow {
    seq:        u64,
    vehicle_id: u32,
    class:      &'static str,
    direction:  &'static str,
    priority:   u8,
    tunnel_id:  u32,
    kind:       &'static str,
}

fn kind_column(kind: EventKind) -> &'static str {
    match kind {
        EventKind::EnterAttempt   => "enter_attempt",
        EventKind::EnterSucceeded => "enter_succeeded",
        EventKind::EnterFailed    => "enter_failed",
        EventKind::LeaveStart     => "leave_start",
        EventKind::LeaveEnd       => "leave_end",
    }
}

/// Write `events` to a CSV file at `path` (created or truncated).
///
/// `seq` is the event's position in the recorded order, so the file stands
/// alone even after sorting or filtering in other tools.
pub fn write_events(path: &Path, events: &[Event]) -> LogResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for (seq, event) in events.iter().enumerate() {
        writer.serialize(EventRow {
            seq:        seq as u64,
            vehicle_id: event.vehicle.id.0,
            class:      event.vehicle.class.as_str(),
            direction:  event.vehicle.direction.as_str(),
            priority:   event.vehicle.priority,
            tunnel_id:  event.tunnel.0,
            kind:       kind_column(event.kind),
        })?;
    }
    writer.flush()?;
    Ok(())
}
