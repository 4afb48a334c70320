//! Graph error type.

use thiserror::Error;

use ew_core::NodeId;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("{node} is out of range for a graph with {node_count} nodes")]
    NodeOutOfRange { node: NodeId, node_count: usize },

    #[error("graph with {0} nodes exceeds the NodeId range")]
    TooManyNodes(usize),
}

pub type GraphResult<T> = Result<T, GraphError>;
