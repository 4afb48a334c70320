use thiserror::Error;

use ew_core::{AgentId, NodeId};

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("{0} not found")]
    AgentNotFound(AgentId),

    #[error("{node} is out of range for a graph with {node_count} nodes")]
    NodeOutOfRange { node: NodeId, node_count: usize },

    #[error("cannot place walkers on a graph with no nodes")]
    NoNodes,

    #[error("agent count must be positive")]
    NoAgents,

    #[error("infected fraction must lie in [0, 1], got {0}")]
    InvalidFraction(f64),

    #[error("{what} count at {node} is {stored} but the agent arrays say {actual}")]
    AggregateDrift {
        node:   NodeId,
        what:   &'static str,
        stored: u32,
        actual: u32,
    },
}

pub type AgentResult<T> = Result<T, AgentError>;
