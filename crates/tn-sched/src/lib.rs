//! `tn-sched` — the admission-control core of the `rust_tn` framework.
//!
//! # Admission protocol
//!
//! ```text
//! admit(vehicle):
//!   ① lock; counts[vehicle.priority] += 1
//!   ② wait until vehicle.priority == highest priority with waiters
//!   ③ scan tunnels in ascending id; first try_enter success wins
//!   ④ success → record assignment, broadcast, return tunnel id
//!   ⑤ failure → keep the count claimed, re-enter the wait at ②
//!
//! release(vehicle):
//!   remove assignment → leave() that tunnel (if any)
//!   counts[vehicle.priority] -= 1; broadcast
//! ```
//!
//! Only the single highest-priority waiting cohort may attempt admission at
//! any moment; everything below waits even when tunnels sit empty.  One
//! mutex serializes all shared state, one condvar (broadcast on every
//! occupancy or count change) wakes the waiters.
//!
//! | Module         | Contents                                    |
//! |----------------|---------------------------------------------|
//! | [`tunnel`]     | `Tunnel` occupancy state machine            |
//! | [`assignment`] | `AssignmentMap` (vehicle → held tunnel)     |
//! | [`scheduler`]  | `PriorityScheduler` (mutex + condvar core)  |
//!
//! # Cargo features
//!
//! | Feature   | Effect                                             |
//! |-----------|----------------------------------------------------|
//! | `fx-hash` | FxHash-backed assignment map instead of SipHash.   |

pub mod assignment;
pub mod error;
pub mod scheduler;
pub mod tunnel;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use assignment::AssignmentMap;
pub use error::{SchedError, SchedResult};
pub use scheduler::PriorityScheduler;
pub use tunnel::Tunnel;
