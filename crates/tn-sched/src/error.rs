//! Error types for tn-sched.
//!
//! The scheduler has no recoverable errors in steady state — admission blocks
//! instead of failing, and a misdirected release is tolerated.  Errors here
//! are construction-time only and fatal at startup.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchedError {
    #[error("scheduler configuration error: {0}")]
    Config(String),
}

pub type SchedResult<T> = Result<T, SchedError>;
