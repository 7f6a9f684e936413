//! Error types for tn-sim.

use thiserror::Error;
use tn_core::VehicleId;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("scheduler error: {0}")]
    Sched(#[from] tn_sched::SchedError),

    #[error("event log export error: {0}")]
    Log(#[from] tn_log::LogError),

    #[error("worker thread for {vehicle} panicked")]
    WorkerPanicked { vehicle: VehicleId },
}

pub type SimResult<T> = Result<T, SimError>;
