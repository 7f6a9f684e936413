//! Fluent builder for constructing a [`Simulation`].

use std::sync::Arc;

use tn_log::{EventLog, EventSink};
use tn_sched::PriorityScheduler;

use crate::spawn::generate_population;
use crate::{SimConfig, SimError, Simulation, SimResult};

/// Builder validating a [`SimConfig`] and assembling the scheduler, event
/// log, and vehicle population into a ready-to-run [`Simulation`].
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(SimConfig { num_tunnels: 3, num_vehicles: 12, ..Default::default() })
///     .build()?;
/// let summary = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config: SimConfig,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self { config }
    }

    /// Validate the configuration and build the simulation.
    ///
    /// Zero tunnels or zero vehicles is a configuration error — such a run
    /// could never terminate or would be vacuous, so it is rejected here
    /// rather than hanging later.
    pub fn build(self) -> SimResult<Simulation> {
        if self.config.num_vehicles == 0 {
            return Err(SimError::Config("vehicle count must be positive".into()));
        }

        let log = Arc::new(EventLog::new());
        let scheduler = PriorityScheduler::new(
            self.config.num_tunnels,
            Arc::clone(&log) as Arc<dyn EventSink>,
        )?;
        let vehicles = generate_population(&self.config);

        Ok(Simulation {
            config: self.config,
            scheduler: Arc::new(scheduler),
            log,
            vehicles,
        })
    }
}
