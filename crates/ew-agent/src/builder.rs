//! Initial walker placement.
//!
//! # Usage
//!
//! ```rust
//! use ew_agent::{AgentStoreBuilder, Placement};
//! use ew_core::SimRng;
//!
//! let mut rng = SimRng::new(42);
//! let store = AgentStoreBuilder::new(20, Placement::Uniform { agents: 1_000 })
//!     .build(&mut rng)
//!     .unwrap();
//! assert_eq!(store.len(), 1_000);
//! assert_eq!(store.counts().total().iter().sum::<u32>(), 1_000);
//! ```

use ew_core::{NodeId, SimRng};

use crate::{AgentError, AgentResult, AgentStore};

/// Where the walkers start.  Every walker starts susceptible.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Placement {
    /// Each walker on an independent uniformly random node.
    Uniform { agents: usize },
    /// Every walker on `node`.
    SingleNode { agents: usize, node: NodeId },
}

impl Placement {
    pub fn agent_count(&self) -> usize {
        match *self {
            Placement::Uniform { agents } | Placement::SingleNode { agents, .. } => agents,
        }
    }
}

/// Builds an [`AgentStore`] for a graph of `node_count` nodes.
pub struct AgentStoreBuilder {
    node_count: usize,
    placement:  Placement,
}

impl AgentStoreBuilder {
    pub fn new(node_count: usize, placement: Placement) -> Self {
        Self { node_count, placement }
    }

    /// Place the walkers.  Uniform placement draws one node per walker, in
    /// ascending `AgentId` order; single-node placement draws nothing.
    pub fn build(self, rng: &mut SimRng) -> AgentResult<AgentStore> {
        if self.node_count == 0 {
            return Err(AgentError::NoNodes);
        }
        let agents = self.placement.agent_count();
        if agents == 0 {
            return Err(AgentError::NoAgents);
        }

        let positions = match self.placement {
            Placement::Uniform { .. } => (0..agents)
                .map(|_| NodeId(rng.gen_range(0..self.node_count as u32)))
                .collect(),
            Placement::SingleNode { node, .. } => vec![node; agents],
        };
        AgentStore::from_positions(self.node_count, positions)
    }
}
