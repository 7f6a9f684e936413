//! `tn-core` — foundational types for the `rust_tn` tunnel admission framework.
//!
//! This crate is a dependency of every other `tn-*` crate.  It intentionally
//! has no `tn-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`ids`]     | `VehicleId`, `TunnelId`                               |
//! | [`vehicle`] | `Vehicle`, `VehicleClass`, `Direction`, priority bounds |
//! | [`rng`]     | `SimRng` (deterministic population sampling)          |
//! | [`error`]   | `TnError`, `TnResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                |
//! |---------|-------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.   |

pub mod error;
pub mod ids;
pub mod rng;
pub mod vehicle;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{TnError, TnResult};
pub use ids::{TunnelId, VehicleId};
pub use rng::SimRng;
pub use vehicle::{Direction, Vehicle, VehicleClass, HIGHEST_PRIORITY, PRIORITY_LEVELS};
