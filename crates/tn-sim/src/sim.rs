//! The `Simulation` struct and its thread harness.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tn_core::Vehicle;
use tn_log::{Event, EventLog};
use tn_sched::PriorityScheduler;

use crate::{verify_events, SimConfig, SimError, SimObserver, SimResult, VerifyReport};

// ── RunSummary ────────────────────────────────────────────────────────────────

/// Everything a finished run leaves behind.
pub struct RunSummary {
    /// Number of vehicles that crossed.
    pub vehicles: usize,
    /// The drained event log in recorded order (export with
    /// [`tn_log::write_events`]).
    pub events: Vec<Event>,
    /// Verdict of replaying `events` through the offline verifier.
    pub verify: VerifyReport,
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// A configured, ready-to-run simulation.
///
/// Create via [`SimBuilder`][crate::SimBuilder].  `run` consumes the
/// vehicle lifecycle end to end: every vehicle thread blocks in
/// `admit`, sleeps for its crossing time, then calls `release`; the
/// scheduler guarantees every thread eventually gets through.
pub struct Simulation {
    pub(crate) config: SimConfig,
    pub(crate) scheduler: Arc<PriorityScheduler>,
    pub(crate) log: Arc<EventLog>,
    pub(crate) vehicles: Vec<Vehicle>,
}

impl Simulation {
    /// The generated population, in spawn order.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Run the simulation to completion and verify the event log.
    ///
    /// Spawns one worker thread per vehicle, joins them all, then drains and
    /// replays the log.  A panicking worker is a bug in the core (vehicle
    /// threads have no other failure mode) and is surfaced as
    /// [`SimError::WorkerPanicked`] after the remaining workers are joined.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunSummary> {
        let mut handles: Vec<(Vehicle, JoinHandle<()>)> =
            Vec::with_capacity(self.vehicles.len());

        for &vehicle in &self.vehicles {
            let scheduler = Arc::clone(&self.scheduler);
            let crossing = Duration::from_millis(self.config.crossing_millis(vehicle.speed()));
            let handle = thread::spawn(move || {
                scheduler.admit(&vehicle);
                thread::sleep(crossing);
                scheduler.release(&vehicle);
            });
            observer.on_vehicle_spawned(&vehicle);
            handles.push((vehicle, handle));
        }

        let mut panicked = None;
        for (vehicle, handle) in handles {
            match handle.join() {
                Ok(()) => observer.on_vehicle_done(&vehicle),
                Err(_) => panicked = Some(vehicle.id),
            }
        }
        if let Some(vehicle) = panicked {
            return Err(SimError::WorkerPanicked { vehicle });
        }

        let events = self.log.drain();
        let verify = verify_events(&events, self.config.num_tunnels, self.vehicles.len());
        observer.on_sim_end(&verify);

        Ok(RunSummary {
            vehicles: self.vehicles.len(),
            events,
            verify,
        })
    }
}
