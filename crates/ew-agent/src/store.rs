//! Walker storage: per-agent SoA arrays plus per-node aggregates.
//!
//! Positions and health are indexed by `AgentId`; the aggregates in
//! [`NodeCounts`] are indexed by `NodeId`.  Both live behind one struct with
//! private fields so no caller can update one side without the other.

use ew_core::{AgentId, Health, NodeId, SimRng};

use crate::{AgentError, AgentResult};

// ── NodeCounts ────────────────────────────────────────────────────────────────

/// Per-node running counts of walkers present and infected walkers present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeCounts {
    total:    Vec<u32>,
    infected: Vec<u32>,
}

impl NodeCounts {
    fn new(node_count: usize) -> Self {
        Self {
            total:    vec![0; node_count],
            infected: vec![0; node_count],
        }
    }

    pub fn node_count(&self) -> usize {
        self.total.len()
    }

    /// Walkers present at each node.
    #[inline]
    pub fn total(&self) -> &[u32] {
        &self.total
    }

    /// Infected walkers present at each node.
    #[inline]
    pub fn infected(&self) -> &[u32] {
        &self.infected
    }

    #[inline]
    pub fn total_at(&self, node: NodeId) -> u32 {
        self.total[node.index()]
    }

    #[inline]
    pub fn infected_at(&self, node: NodeId) -> u32 {
        self.infected[node.index()]
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for every walker.
///
/// Every per-agent `Vec` has exactly `len()` elements; `AgentId` is the index.
pub struct AgentStore {
    position: Vec<NodeId>,
    health:   Vec<Health>,
    counts:   NodeCounts,
}

impl AgentStore {
    /// Build a store of susceptible walkers at the given positions.
    pub(crate) fn from_positions(node_count: usize, position: Vec<NodeId>) -> AgentResult<Self> {
        let mut counts = NodeCounts::new(node_count);
        for &node in &position {
            if node.index() >= node_count {
                return Err(AgentError::NodeOutOfRange { node, node_count });
            }
            counts.total[node.index()] += 1;
        }
        let health = vec![Health::Susceptible; position.len()];
        Ok(Self { position, health, counts })
    }

    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn len(&self) -> usize {
        self.position.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.counts.node_count()
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.len() as u32).map(AgentId)
    }

    #[inline]
    pub fn position(&self, agent: AgentId) -> NodeId {
        self.position[agent.index()]
    }

    #[inline]
    pub fn health(&self, agent: AgentId) -> Health {
        self.health[agent.index()]
    }

    /// Node of every walker, indexed by `AgentId`.
    #[inline]
    pub fn positions(&self) -> &[NodeId] {
        &self.position
    }

    #[inline]
    pub fn healths(&self) -> &[Health] {
        &self.health
    }

    #[inline]
    pub fn counts(&self) -> &NodeCounts {
        &self.counts
    }

    /// Number of infected walkers across the whole graph.
    pub fn infected_count(&self) -> usize {
        self.health.iter().filter(|h| h.is_infected()).count()
    }

    // ── Mutation (the only two entry points) ──────────────────────────────

    /// Move `agent` to `to`, updating totals (and infected counts if the
    /// walker is infected) at the old and new node.  Returns the old node.
    pub fn move_agent(&mut self, agent: AgentId, to: NodeId) -> AgentResult<NodeId> {
        let i = self.check_agent(agent)?;
        self.check_node(to)?;

        let from = self.position[i];
        if from == to {
            return Ok(from);
        }
        self.counts.total[from.index()] -= 1;
        self.counts.total[to.index()] += 1;
        if self.health[i].is_infected() {
            self.counts.infected[from.index()] -= 1;
            self.counts.infected[to.index()] += 1;
        }
        self.position[i] = to;
        Ok(from)
    }

    /// Set the health of `agent`, updating the infected count at its current
    /// node.  Setting the current value is a no-op.  Returns the old value.
    pub fn set_health(&mut self, agent: AgentId, health: Health) -> AgentResult<Health> {
        let i = self.check_agent(agent)?;
        let prev = self.health[i];
        let node = self.position[i].index();
        match (prev, health) {
            (Health::Susceptible, Health::Infected) => self.counts.infected[node] += 1,
            (Health::Infected, Health::Susceptible) => self.counts.infected[node] -= 1,
            _ => {}
        }
        self.health[i] = health;
        Ok(prev)
    }

    /// Infect `floor(len * fraction)` distinct walkers chosen uniformly without
    /// replacement.  Returns the chosen ids in selection order.
    pub fn infect_fraction(&mut self, fraction: f64, rng: &mut SimRng) -> AgentResult<Vec<AgentId>> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(AgentError::InvalidFraction(fraction));
        }
        let amount = (self.len() as f64 * fraction) as usize;
        let chosen: Vec<AgentId> = rng
            .sample_indices(self.len(), amount.min(self.len()))
            .into_iter()
            .map(|i| AgentId(i as u32))
            .collect();
        for &agent in &chosen {
            self.set_health(agent, Health::Infected)?;
        }
        Ok(chosen)
    }

    // ── Audit ─────────────────────────────────────────────────────────────

    /// Recompute the node aggregates from the agent arrays and compare.
    pub fn check_invariants(&self) -> AgentResult<()> {
        let mut fresh = NodeCounts::new(self.node_count());
        for (node, health) in self.position.iter().zip(&self.health) {
            fresh.total[node.index()] += 1;
            if health.is_infected() {
                fresh.infected[node.index()] += 1;
            }
        }
        for n in 0..self.node_count() {
            let node = NodeId(n as u32);
            if fresh.total[n] != self.counts.total[n] {
                return Err(AgentError::AggregateDrift {
                    node,
                    what:   "total",
                    stored: self.counts.total[n],
                    actual: fresh.total[n],
                });
            }
            if fresh.infected[n] != self.counts.infected[n] {
                return Err(AgentError::AggregateDrift {
                    node,
                    what:   "infected",
                    stored: self.counts.infected[n],
                    actual: fresh.infected[n],
                });
            }
        }
        Ok(())
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    #[inline]
    fn check_agent(&self, agent: AgentId) -> AgentResult<usize> {
        let i = agent.index();
        if i < self.len() { Ok(i) } else { Err(AgentError::AgentNotFound(agent)) }
    }

    #[inline]
    fn check_node(&self, node: NodeId) -> AgentResult<()> {
        if node.index() < self.node_count() {
            Ok(())
        } else {
            Err(AgentError::NodeOutOfRange { node, node_count: self.node_count() })
        }
    }
}
