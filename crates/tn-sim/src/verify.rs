//! Offline event-log verification.
//!
//! After a run, the drained FIFO is replayed against a model of every
//! tunnel.  Because all events were recorded under the scheduler lock, log
//! order is true real-time order, and every admission decision can be
//! re-checked deterministically after the fact.
//!
//! # Checks
//!
//! - **Priority gate** — no vehicle is admitted while a higher-priority
//!   vehicle is waiting (has attempted, not yet admitted).
//! - **Occupancy / capacity** — every admission was into a tunnel that was
//!   empty or held compatible occupants below class capacity; every
//!   rejection happened for a reason.
//! - **Assignment uniqueness** — no vehicle is admitted twice without
//!   leaving, and nothing leaves a tunnel it never entered.
//! - **Conservation** — exactly `num_vehicles` successful entries and exits.

use std::collections::HashMap;
use std::fmt;

use tn_core::{Direction, TunnelId, Vehicle, VehicleClass, VehicleId};
use tn_log::{Event, EventKind};

// ── Violations ────────────────────────────────────────────────────────────────

/// One verifiable property broken by the event stream, with the evidence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// `admitted` succeeded while `waiting` (strictly higher priority) had
    /// attempted and not yet been admitted.
    PriorityGate { admitted: Vehicle, waiting: Vehicle },
    /// An `EnterSucceeded` into a tunnel that was full or incompatible.
    ImpossibleAdmission { vehicle: Vehicle, tunnel: TunnelId },
    /// An `EnterFailed` against a tunnel that had room for the vehicle.
    WrongRejection { vehicle: Vehicle, tunnel: TunnelId },
    /// A vehicle was admitted while still holding a tunnel.
    DoubleAssignment { vehicle: Vehicle },
    /// A `LeaveEnd` for a vehicle holding no tunnel.
    UnmatchedLeave { vehicle: Vehicle, tunnel: TunnelId },
    /// Entry/exit totals differ from the population size.
    Conservation { entered: usize, left: usize, expected: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::PriorityGate { admitted, waiting } => {
                write!(f, "{admitted} was admitted while {waiting} was waiting")
            }
            Violation::ImpossibleAdmission { vehicle, tunnel } => {
                write!(f, "{vehicle} should not have entered tunnel {}", tunnel.0)
            }
            Violation::WrongRejection { vehicle, tunnel } => {
                write!(f, "{vehicle} should have entered tunnel {}", tunnel.0)
            }
            Violation::DoubleAssignment { vehicle } => {
                write!(f, "{vehicle} was already in a tunnel")
            }
            Violation::UnmatchedLeave { vehicle, tunnel } => {
                write!(f, "{vehicle} left tunnel {} it never entered", tunnel.0)
            }
            Violation::Conservation { entered, left, expected } => {
                write!(
                    f,
                    "expected {expected} vehicles to cross; {entered} entered, {left} left"
                )
            }
        }
    }
}

// ── Report ────────────────────────────────────────────────────────────────────

/// Outcome of replaying one event log.
#[derive(Debug, Default)]
pub struct VerifyReport {
    pub violations: Vec<Violation>,
    /// Total `EnterSucceeded` events observed.
    pub entered: usize,
    /// Total `LeaveEnd` events observed.
    pub left: usize,
}

impl VerifyReport {
    /// `true` if every checked property held.
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            write!(
                f,
                "all {} vehicles entered and left a tunnel correctly",
                self.entered
            )
        } else {
            writeln!(f, "{} violation(s):", self.violations.len())?;
            for v in &self.violations {
                writeln!(f, "  - {v}")?;
            }
            Ok(())
        }
    }
}

// ── Tunnel model ──────────────────────────────────────────────────────────────

/// Replay-side model of one tunnel's occupancy.
#[derive(Default)]
struct TunnelModel {
    occupancy: Option<(VehicleClass, Direction)>,
    count: usize,
}

impl TunnelModel {
    fn admits(&self, vehicle: &Vehicle) -> bool {
        match self.occupancy {
            None => true,
            Some((class, direction)) => {
                class == vehicle.class
                    && direction == vehicle.direction
                    && self.count < class.capacity()
            }
        }
    }

    fn enter(&mut self, vehicle: &Vehicle) {
        if self.occupancy.is_none() {
            self.occupancy = Some((vehicle.class, vehicle.direction));
        }
        self.count += 1;
    }

    fn leave(&mut self) {
        self.count = self.count.saturating_sub(1);
        if self.count == 0 {
            self.occupancy = None;
        }
    }
}

// ── Verifier ──────────────────────────────────────────────────────────────────

/// Replay `events` and check every property against a `num_tunnels`-tunnel,
/// `num_vehicles`-vehicle run.
pub fn verify_events(events: &[Event], num_tunnels: usize, num_vehicles: usize) -> VerifyReport {
    let mut report = VerifyReport::default();
    let mut tunnels: Vec<TunnelModel> = (0..num_tunnels).map(|_| TunnelModel::default()).collect();
    // Vehicles that have attempted at least once and not yet been admitted.
    let mut waiting: HashMap<VehicleId, Vehicle> = HashMap::new();
    // Live vehicle → tunnel assignments.
    let mut holding: HashMap<VehicleId, TunnelId> = HashMap::new();

    for event in events {
        let vehicle = event.vehicle;
        let Some(tunnel) = tunnels.get_mut(event.tunnel.index()) else {
            // An id outside the collection can only come from a corrupted
            // log; report it as an impossible admission and move on.
            report.violations.push(Violation::ImpossibleAdmission {
                vehicle,
                tunnel: event.tunnel,
            });
            continue;
        };

        match event.kind {
            EventKind::EnterAttempt => {
                waiting.entry(vehicle.id).or_insert(vehicle);
            }

            EventKind::EnterSucceeded => {
                report.entered += 1;

                if let Some(higher) = waiting
                    .values()
                    .find(|w| w.id != vehicle.id && w.priority > vehicle.priority)
                {
                    report.violations.push(Violation::PriorityGate {
                        admitted: vehicle,
                        waiting: *higher,
                    });
                }

                if holding.contains_key(&vehicle.id) {
                    report.violations.push(Violation::DoubleAssignment { vehicle });
                } else if !tunnel.admits(&vehicle) {
                    report.violations.push(Violation::ImpossibleAdmission {
                        vehicle,
                        tunnel: event.tunnel,
                    });
                } else {
                    tunnel.enter(&vehicle);
                    holding.insert(vehicle.id, event.tunnel);
                }
                waiting.remove(&vehicle.id);
            }

            EventKind::EnterFailed => {
                if tunnel.admits(&vehicle) {
                    report.violations.push(Violation::WrongRejection {
                        vehicle,
                        tunnel: event.tunnel,
                    });
                }
            }

            EventKind::LeaveStart => {}

            EventKind::LeaveEnd => {
                report.left += 1;
                if holding.remove(&vehicle.id).is_none() {
                    report.violations.push(Violation::UnmatchedLeave {
                        vehicle,
                        tunnel: event.tunnel,
                    });
                }
                tunnel.leave();
            }
        }
    }

    if report.entered != num_vehicles || report.left != num_vehicles {
        report.violations.push(Violation::Conservation {
            entered: report.entered,
            left: report.left,
            expected: num_vehicles,
        });
    }

    report
}
