//! `ew-graph` — the static graph the walkers move on.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`network`] | `Graph` trait, `AdjacencyGraph` (CSR), `GraphBuilder`     |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                            |
//!
//! The simulator only ever asks two questions of a graph: how many nodes are
//! there, and who are the neighbours of node `n`.  Anything that can answer
//! those (a networkx export, a generated community graph, …) can implement
//! [`Graph`]; [`AdjacencyGraph`] is the provided implementation.

pub mod error;
pub mod network;

#[cfg(test)]
mod tests;

pub use error::{GraphError, GraphResult};
pub use network::{AdjacencyGraph, Graph, GraphBuilder};
