//! The `RateModel` trait and the two built-in rate models.

use ew_core::Health;

use crate::{RateError, RateResult};

/// Transition rates for a single walker, given its local state.
///
/// Implementations are plain parameter holders: all randomness happens in
/// [`EventSampler`][crate::EventSampler], which calls these methods once per
/// sampled event.
///
/// # Example
///
/// ```rust
/// use ew_core::Health;
/// use ew_rates::{RateModel, RateResult, check_rate};
///
/// /// Infected walkers stay home.
/// struct Quarantine { movement: f64, infection: f64, recovery: f64 }
///
/// impl RateModel for Quarantine {
///     fn movement_rate(&self, health: Health) -> f64 {
///         if health.is_infected() { 0.0 } else { self.movement }
///     }
///     fn infection_rate(&self, _infected_here: u32) -> f64 { self.infection }
///     fn recovery_rate(&self) -> f64 { self.recovery }
///     fn validate(&self) -> RateResult<()> {
///         check_rate("movement", self.movement)?;
///         check_rate("infection", self.infection)?;
///         check_rate("recovery", self.recovery)
///     }
/// }
/// ```
pub trait RateModel {
    /// Rate at which a walker with `health` jumps to a neighbour.
    fn movement_rate(&self, health: Health) -> f64;

    /// Rate at which a susceptible walker becomes infected when
    /// `infected_here` infected walkers share its node.
    fn infection_rate(&self, infected_here: u32) -> f64;

    /// Rate at which an infected walker recovers.
    fn recovery_rate(&self) -> f64;

    /// Reject parameters that would produce NaN or negative waiting times.
    fn validate(&self) -> RateResult<()>;
}

/// Validate one rate parameter: finite and `>= 0`.
pub fn check_rate(name: &'static str, value: f64) -> RateResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RateError::InvalidRate { name, value })
    }
}

// ── ConstantRates ─────────────────────────────────────────────────────────────

/// Constant rates, independent of position and of other walkers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstantRates {
    pub movement:  f64,
    pub infection: f64,
    pub recovery:  f64,
}

impl ConstantRates {
    pub fn new(movement: f64, infection: f64, recovery: f64) -> Self {
        Self { movement, infection, recovery }
    }

    /// Pure random walk: walkers move but never change health.
    pub fn movement_only(movement: f64) -> Self {
        Self { movement, infection: 0.0, recovery: 0.0 }
    }
}

impl RateModel for ConstantRates {
    #[inline]
    fn movement_rate(&self, _health: Health) -> f64 {
        self.movement
    }

    #[inline]
    fn infection_rate(&self, _infected_here: u32) -> f64 {
        self.infection
    }

    #[inline]
    fn recovery_rate(&self) -> f64 {
        self.recovery
    }

    fn validate(&self) -> RateResult<()> {
        check_rate("movement rate", self.movement)?;
        check_rate("infection rate", self.infection)?;
        check_rate("recovery rate", self.recovery)
    }
}

// ── MassActionRates ───────────────────────────────────────────────────────────

/// Density-dependent infection with health-dependent mobility.
///
/// A susceptible walker is infected at rate `beta * I(n)`, where `I(n)` is the
/// number of infected walkers at its node; it cannot be infected on a node
/// with no infected walkers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MassActionRates {
    pub movement_susceptible: f64,
    pub movement_infected:    f64,
    pub beta:                 f64,
    pub recovery:             f64,
}

impl MassActionRates {
    pub fn new(movement_susceptible: f64, movement_infected: f64, beta: f64, recovery: f64) -> Self {
        Self { movement_susceptible, movement_infected, beta, recovery }
    }
}

impl RateModel for MassActionRates {
    #[inline]
    fn movement_rate(&self, health: Health) -> f64 {
        match health {
            Health::Susceptible => self.movement_susceptible,
            Health::Infected    => self.movement_infected,
        }
    }

    #[inline]
    fn infection_rate(&self, infected_here: u32) -> f64 {
        self.beta * f64::from(infected_here)
    }

    #[inline]
    fn recovery_rate(&self) -> f64 {
        self.recovery
    }

    fn validate(&self) -> RateResult<()> {
        check_rate("susceptible movement rate", self.movement_susceptible)?;
        check_rate("infected movement rate", self.movement_infected)?;
        check_rate("beta", self.beta)?;
        check_rate("recovery rate", self.recovery)
    }
}
