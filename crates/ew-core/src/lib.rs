//! `ew-core` — foundational types for the `epiwalk` epidemic random-walk
//! simulator.
//!
//! This crate is a dependency of every other `ew-*` crate.  It has no `ew-*`
//! dependencies and only a handful of external ones (`rand`, `rand_distr`,
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                 |
//! |------------|----------------------------------------------------------|
//! | [`ids`]    | `AgentId`, `NodeId`                                      |
//! | [`health`] | `Health` (susceptible / infected)                        |
//! | [`time`]   | `SimTime`, `SimClock`, `RunConfig`, `SnapshotMode`       |
//! | [`rng`]    | `SimRng` (the single seeded random stream)               |
//! | [`error`]  | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod error;
pub mod health;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use health::Health;
pub use ids::{AgentId, NodeId};
pub use rng::SimRng;
pub use time::{RunConfig, SimClock, SimTime, SnapshotMode};
