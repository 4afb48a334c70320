//! `ew-sim` — the event loop of the `epiwalk` simulator.
//!
//! # Event loop
//!
//! ```text
//! build:  place walkers, infect a fraction                (phase Idle)
//! run:    sample one event per walker, push, snapshot t=0 (phase Running)
//!         while now < start + horizon:
//!   ① Pop      — earliest pending event; clock advances to its time.
//!   ② Apply    — Move → AgentStore::move_agent
//!                Infect / Recover → AgentStore::set_health
//!   ③ Resample — draw the walker's next event and push it
//!                (queue length is back to the agent count).
//!   ④ Record   — snapshot if the cadence interval has elapsed.
//!         then phase Completed
//! ```
//!
//! # Quick-start
//!
//! ```rust
//! use ew_core::RunConfig;
//! use ew_graph::AdjacencyGraph;
//! use ew_rates::MassActionRates;
//! use ew_sim::{NoopObserver, SimBuilder};
//!
//! let graph = AdjacencyGraph::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
//! let mut sim = SimBuilder::new(graph, MassActionRates::new(0.3, 0.3, 0.2, 0.1), 42)
//!     .uniform(200)
//!     .infected_fraction(0.05)
//!     .build()
//!     .unwrap();
//! sim.run(&RunConfig::linear(10.0, 0.1), &mut NoopObserver).unwrap();
//!
//! let series = sim.series();
//! assert_eq!(series.timeline.len(), series.node_log.len());
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod recorder;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use recorder::{Grid, Recorder, SnapshotSchedule, TimeSeries};
pub use sim::{Sim, SimPhase};
