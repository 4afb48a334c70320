//! Continuous simulation time.
//!
//! # Design
//!
//! Time is a non-negative `f64` wrapped in [`SimTime`].  Events carry absolute
//! times; `+∞` is a legal value and marks an event that will never fire (a
//! walker parked on an isolated node, or one whose every clock is disabled).
//!
//! [`SimClock`] owns the current time and refuses to move backwards, so the
//! "time is non-decreasing" guarantee is enforced in exactly one place.

use std::cmp::Ordering;
use std::fmt;

use crate::{CoreError, CoreResult};

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute point in simulated time.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);
    pub const INFINITY: SimTime = SimTime(f64::INFINITY);

    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Total order over all `f64` bit patterns (`f64::total_cmp`).
    ///
    /// Used by the event queue, which never holds NaN but must still be `Ord`.
    #[inline]
    pub fn total_cmp(&self, other: &SimTime) -> Ordering {
        self.0.total_cmp(&other.0)
    }

    /// Return the time `dt` after `self`.  `dt = +∞` yields `SimTime::INFINITY`.
    #[inline]
    pub fn after(self, dt: f64) -> SimTime {
        SimTime(self.0 + dt)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.6}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The simulation clock.  Advances only to the time of the event just popped.
#[derive(Clone, Debug, Default)]
pub struct SimClock {
    now: SimTime,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Move the clock forward to `t`.
    ///
    /// Fails if `t` is NaN or earlier than the current time.  Advancing to the
    /// current time is allowed (simultaneous events).
    pub fn advance_to(&mut self, t: SimTime) -> CoreResult<()> {
        if t.0.is_nan() {
            return Err(CoreError::NotANumber(t.0));
        }
        if t < self.now {
            return Err(CoreError::ClockRegression { now: self.now, requested: t });
        }
        self.now = t;
        Ok(())
    }
}

// ── SnapshotMode ──────────────────────────────────────────────────────────────

/// How the distance between two snapshot times is measured.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SnapshotMode {
    /// `now - last`
    #[default]
    Linear,
    /// `ln(now) - ln(last)`; dense early, sparse late.
    Logarithmic,
}

impl SnapshotMode {
    /// Distance from the last snapshot at `last` to `now` in this mode's units.
    ///
    /// In logarithmic mode `last = 0` gives `+∞`, so the first event after the
    /// initial snapshot is always recorded.
    #[inline]
    pub fn elapsed(self, last: SimTime, now: SimTime) -> f64 {
        match self {
            SnapshotMode::Linear      => now.0 - last.0,
            SnapshotMode::Logarithmic => now.0.ln() - last.0.ln(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SnapshotMode::Linear      => "linear",
            SnapshotMode::Logarithmic => "log",
        }
    }
}

impl fmt::Display for SnapshotMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── RunConfig ─────────────────────────────────────────────────────────────────

/// Parameters of one call to the engine's `run`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    /// Length of simulated time to cover.  Must be finite and `> 0`.
    pub horizon: f64,

    /// Minimum distance (in `snapshot_mode` units) between two snapshots.
    /// Must be finite and `>= 0`; `0` records after every event that advances
    /// the clock.
    pub snapshot_interval: f64,

    pub snapshot_mode: SnapshotMode,
}

impl RunConfig {
    pub fn linear(horizon: f64, snapshot_interval: f64) -> Self {
        Self { horizon, snapshot_interval, snapshot_mode: SnapshotMode::Linear }
    }

    pub fn logarithmic(horizon: f64, snapshot_interval: f64) -> Self {
        Self { horizon, snapshot_interval, snapshot_mode: SnapshotMode::Logarithmic }
    }

    pub fn validate(&self) -> CoreResult<()> {
        if !(self.horizon.is_finite() && self.horizon > 0.0) {
            return Err(CoreError::Config(format!(
                "horizon must be finite and positive, got {}",
                self.horizon
            )));
        }
        if !(self.snapshot_interval.is_finite() && self.snapshot_interval >= 0.0) {
            return Err(CoreError::Config(format!(
                "snapshot interval must be finite and non-negative, got {}",
                self.snapshot_interval
            )));
        }
        Ok(())
    }
}

impl Default for RunConfig {
    /// Ten time units, one snapshot every 0.1.
    fn default() -> Self {
        RunConfig::linear(10.0, 0.1)
    }
}
