//! Vehicle attributes: class, direction, and priority bounds.
//!
//! A vehicle's attributes are immutable after creation.  The class determines
//! both how many same-class vehicles may share a tunnel (`capacity`) and how
//! fast the vehicle crosses (`speed`).  Capacity is a property of the class
//! occupying the tunnel — a tunnel holding cars admits up to three cars, a
//! tunnel holding a sled holds exactly one sled.

use std::fmt;

use crate::VehicleId;

/// Highest admissible priority level.  Priorities are `0..=HIGHEST_PRIORITY`,
/// higher value = more urgent.
pub const HIGHEST_PRIORITY: u8 = 4;

/// Number of distinct priority levels — the length of the scheduler's
/// fixed waiting-count array.
pub const PRIORITY_LEVELS: usize = HIGHEST_PRIORITY as usize + 1;

// ── VehicleClass ──────────────────────────────────────────────────────────────

/// The kind of vehicle contending for a tunnel.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleClass {
    /// Passenger car — fast, and tunnels fit several at once.
    Car,
    /// Sled — slow, and needs a tunnel to itself.
    Sled,
}

impl VehicleClass {
    /// All classes, for uniform sampling and exhaustive iteration.
    pub const ALL: [VehicleClass; 2] = [VehicleClass::Car, VehicleClass::Sled];

    /// Maximum number of same-class, same-direction vehicles a tunnel can
    /// hold when occupied by this class.
    #[inline]
    pub fn capacity(self) -> usize {
        match self {
            VehicleClass::Car  => 3,
            VehicleClass::Sled => 1,
        }
    }

    /// Crossing speed on a 0–10 scale; higher is faster.  The driver maps
    /// this to a simulated crossing duration.
    #[inline]
    pub fn speed(self) -> u8 {
        match self {
            VehicleClass::Car  => 6,
            VehicleClass::Sled => 4,
        }
    }

    /// Human-readable label, useful for event lines and CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleClass::Car  => "CAR",
            VehicleClass::Sled => "SLED",
        }
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

/// Heading of a vehicle through a tunnel.  Occupants of one tunnel must all
/// share a direction.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    South,
}

impl Direction {
    /// All directions, for uniform sampling.
    pub const ALL: [Direction; 2] = [Direction::North, Direction::South];

    /// The opposing heading.
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
        }
    }

    /// Human-readable label.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "NORTH",
            Direction::South => "SOUTH",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Vehicle ───────────────────────────────────────────────────────────────────

/// One concurrent participant contending for a tunnel.
///
/// Immutable after creation.  The driver owns the vehicle; the scheduler and
/// tunnels only borrow it for the duration of one admit/release cycle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    pub id:        VehicleId,
    pub class:     VehicleClass,
    pub direction: Direction,
    /// Priority in `0..=HIGHEST_PRIORITY`; clamped by [`Vehicle::new`].
    pub priority:  u8,
}

impl Vehicle {
    /// Create a vehicle, clamping `priority` into the admissible range so the
    /// scheduler's fixed-size count array can never be indexed out of bounds.
    pub fn new(id: VehicleId, class: VehicleClass, direction: Direction, priority: u8) -> Self {
        Self {
            id,
            class,
            direction,
            priority: priority.min(HIGHEST_PRIORITY),
        }
    }

    /// Crossing speed inherited from the class.
    #[inline]
    pub fn speed(&self) -> u8 {
        self.class.speed()
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} with priority {}",
            self.direction, self.class, self.id.0, self.priority
        )
    }
}
