//! Framework error type.
//!
//! Sub-crates define their own error enums and either convert into `TnError`
//! via `From` impls or keep them separate and wrap `TnError` as one variant.
//! Both patterns are acceptable; prefer whichever keeps error sites clean.

use thiserror::Error;

/// The top-level error type for `tn-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum TnError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `tn-*` crates.
pub type TnResult<T> = Result<T, TnError>;
