//! `Tunnel` — per-resource occupancy state machine.
//!
//! A tunnel is either empty or occupied by `count` vehicles that all share
//! one class and one direction.  Capacity comes from the occupying class:
//! three cars or one sled.
//!
//! This type has no synchronization of its own.  The scheduler calls it with
//! its lock held, which makes the check-then-mutate in [`try_enter`] atomic
//! with respect to every other vehicle's attempt — and keeps the event stream
//! in true real-time order.
//!
//! [`try_enter`]: Tunnel::try_enter

use tn_core::{Direction, TunnelId, Vehicle, VehicleClass};
use tn_log::{Event, EventKind, EventSink};

/// One shareable, capacity- and compatibility-constrained tunnel.
#[derive(Debug)]
pub struct Tunnel {
    id: TunnelId,
    /// Class and direction of the current occupants; `None` when empty.
    occupancy: Option<(VehicleClass, Direction)>,
    /// Number of vehicles currently inside.  Zero iff `occupancy` is `None`.
    count: usize,
}

impl Tunnel {
    pub fn new(id: TunnelId) -> Self {
        Self {
            id,
            occupancy: None,
            count: 0,
        }
    }

    #[inline]
    pub fn id(&self) -> TunnelId {
        self.id
    }

    /// Number of vehicles currently inside.
    #[inline]
    pub fn occupant_count(&self) -> usize {
        self.count
    }

    /// Class and direction of the current occupants, or `None` when empty.
    #[inline]
    pub fn occupancy(&self) -> Option<(VehicleClass, Direction)> {
        self.occupancy
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Decide whether `vehicle` may enter right now, without mutating or
    /// logging.  Empty ⇒ yes; otherwise occupants must match the vehicle's
    /// class and direction and the class capacity must not be reached.
    pub fn admits(&self, vehicle: &Vehicle) -> bool {
        match self.occupancy {
            None => true,
            Some((class, direction)) => {
                class == vehicle.class
                    && direction == vehicle.direction
                    && self.count < class.capacity()
            }
        }
    }

    /// Attempt to admit `vehicle`.
    ///
    /// Emits `EnterAttempt` unconditionally, then `EnterSucceeded` or
    /// `EnterFailed`.  On success the vehicle is counted as an occupant and
    /// the tunnel's class/direction are stamped if it was empty; on failure
    /// the state is unchanged.
    pub fn try_enter(&mut self, vehicle: &Vehicle, sink: &dyn EventSink) -> bool {
        sink.record(Event::new(*vehicle, self.id, EventKind::EnterAttempt));

        if !self.admits(vehicle) {
            sink.record(Event::new(*vehicle, self.id, EventKind::EnterFailed));
            return false;
        }

        if self.occupancy.is_none() {
            self.occupancy = Some((vehicle.class, vehicle.direction));
        }
        self.count += 1;
        sink.record(Event::new(*vehicle, self.id, EventKind::EnterSucceeded));
        true
    }

    /// Remove `vehicle` from the tunnel, emitting `LeaveStart` / `LeaveEnd`.
    ///
    /// The scheduler only calls this for a vehicle with a live assignment to
    /// this tunnel, so the occupant count is always positive here; leaving an
    /// empty tunnel is a caller bug, caught by the debug assertions.
    pub fn leave(&mut self, vehicle: &Vehicle, sink: &dyn EventSink) {
        debug_assert!(self.count > 0, "leave() on empty {}", self.id);
        debug_assert_eq!(
            self.occupancy,
            Some((vehicle.class, vehicle.direction)),
            "leave() by a vehicle that cannot be an occupant of {}",
            self.id
        );

        sink.record(Event::new(*vehicle, self.id, EventKind::LeaveStart));
        self.count = self.count.saturating_sub(1);
        if self.count == 0 {
            self.occupancy = None;
        }
        sink.record(Event::new(*vehicle, self.id, EventKind::LeaveEnd));
    }
}
