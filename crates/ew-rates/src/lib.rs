//! `ew-rates` — how long until a walker's next transition, and which one.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`model`]   | `RateModel` trait, `ConstantRates`, `MassActionRates`     |
//! | [`sampler`] | `EventSampler`, `Clocks`, `IsolatedNodePolicy`            |
//! | [`error`]   | `RateError`, `RateResult<T>`                              |
//!
//! # Competing clocks (summary)
//!
//! For a walker at node `n` with health `h`, three exponential clocks are
//! drawn, always in this order:
//!
//! ```text
//! movement  ~ Exp(model.movement_rate(h))
//! recovery  ~ Exp(model.recovery_rate())
//! infection ~ Exp(model.infection_rate(infected_at(n)))
//! ```
//!
//! Only the applicable pair races: `(movement, infection)` for a susceptible
//! walker, `(movement, recovery)` for an infected one.  A movement win picks a
//! neighbour of `n` uniformly at random.
//!
//! Every parameter is a **rate**: the mean waiting time is `1 / rate`, and a
//! rate of `0` means the clock never rings.

pub mod error;
pub mod model;
pub mod sampler;


pub use error::{RateError, RateResult};
pub use model::{ConstantRates, MassActionRates, RateModel, check_rate};
pub use sampler::{Clocks, EventSampler, IsolatedNodePolicy};
