//! `ew-agent` — walker storage for the `epiwalk` simulator.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`store`]   | `AgentStore` (SoA position/health), `NodeCounts`         |
//! | [`builder`] | `Placement`, `AgentStoreBuilder`                         |
//! | [`error`]   | `AgentError`, `AgentResult<T>`                           |
//!
//! # Invariants
//!
//! `AgentStore` keeps per-node totals and infected counts in lock-step with
//! the per-agent arrays.  The only mutators are
//! [`AgentStore::move_agent`] and [`AgentStore::set_health`]; after either
//! returns, `sum(total) == agent count` and `infected[n] <= total[n]` for every
//! node.  [`AgentStore::check_invariants`] recomputes the aggregates from
//! scratch for audits and tests.

pub mod builder;
pub mod error;
pub mod store;


pub use builder::{AgentStoreBuilder, Placement};
pub use error::{AgentError, AgentResult};
pub use store::{AgentStore, NodeCounts};
