//! Simulation observer trait for progress reporting.

use tn_core::Vehicle;

use crate::VerifyReport;

/// Callbacks invoked by [`Simulation::run`][crate::Simulation::run] at key
/// points in a run.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct Progress;
///
/// impl SimObserver for Progress {
///     fn on_vehicle_done(&mut self, vehicle: &Vehicle) {
///         println!("{vehicle} has completed");
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called on the driver thread just after a vehicle's worker is spawned.
    fn on_vehicle_spawned(&mut self, _vehicle: &Vehicle) {}

    /// Called on the driver thread once a vehicle's worker has been joined.
    fn on_vehicle_done(&mut self, _vehicle: &Vehicle) {}

    /// Called once after all workers finished and the log was verified.
    fn on_sim_end(&mut self, _report: &VerifyReport) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
