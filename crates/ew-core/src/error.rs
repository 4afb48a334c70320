//! Core error type.
//!
//! Sub-crates define their own error enums and either wrap `CoreError` as one
//! variant (`#[from]`) or report their own variants directly.

use thiserror::Error;

use crate::SimTime;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("clock cannot move backwards from {now} to {requested}")]
    ClockRegression { now: SimTime, requested: SimTime },

    #[error("time value {0} is not a number")]
    NotANumber(f64),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `ew-core`.
pub type CoreResult<T> = Result<T, CoreError>;
