//! Lifecycle events emitted by tunnels during admission and exit.

use std::fmt;

use tn_core::{TunnelId, Vehicle};

// ── EventKind ─────────────────────────────────────────────────────────────────

/// What happened between one vehicle and one tunnel.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum EventKind {
    /// A vehicle asked the tunnel for entry (emitted before the decision).
    EnterAttempt,
    /// The tunnel admitted the vehicle.
    EnterSucceeded,
    /// The tunnel rejected the vehicle (incompatible occupants or full).
    EnterFailed,
    /// The vehicle began leaving its tunnel.
    LeaveStart,
    /// The vehicle has fully left; the occupancy slot is free again.
    LeaveEnd,
}

impl EventKind {
    /// Human-readable phrase, matching the event line format.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::EnterAttempt   => "trying to enter",
            EventKind::EnterSucceeded => "entered successfully",
            EventKind::EnterFailed    => "failed to enter",
            EventKind::LeaveStart     => "leaving",
            EventKind::LeaveEnd       => "left",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Event ─────────────────────────────────────────────────────────────────────

/// One recorded interaction between a vehicle and a tunnel.
///
/// The vehicle's full immutable attributes are copied in (not just its id):
/// the offline verifier replays the stream long after the driver has dropped
/// the vehicles themselves, and needs class/direction/priority to re-check
/// every admission decision.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Event {
    pub vehicle: Vehicle,
    pub tunnel:  TunnelId,
    pub kind:    EventKind,
}

impl Event {
    pub fn new(vehicle: Vehicle, tunnel: TunnelId, kind: EventKind) -> Self {
        Self { vehicle, tunnel, kind }
    }
}

impl fmt::Display for Event {
    /// Renders e.g. `NORTH CAR 7 with priority 2 entered successfully 3`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.vehicle, self.kind, self.tunnel.0)
    }
}
