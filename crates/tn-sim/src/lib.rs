//! `tn-sim` — simulation driver for the rust_tn framework.
//!
//! # Run shape
//!
//! ```text
//! SimBuilder::new(config).build()?
//!   ① generate the vehicle population (deterministic from config.seed)
//!   ② spawn one thread per vehicle: admit → cross (sleep) → release
//!   ③ join all threads
//!   ④ drain the event log and replay it through the offline verifier
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tn_sim::{NoopObserver, SimBuilder, SimConfig};
//!
//! let mut sim = SimBuilder::new(SimConfig::default()).build()?;
//! let summary = sim.run(&mut NoopObserver)?;
//! assert!(summary.verify.is_clean());
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod sim;
pub mod spawn;
pub mod verify;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::SimBuilder;
pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{RunSummary, Simulation};
pub use verify::{verify_events, VerifyReport, Violation};
