//! Fluent builder for constructing a [`Sim`].

use ew_agent::{AgentStoreBuilder, Placement};
use ew_core::{NodeId, SimClock, SimRng};
use ew_graph::Graph;
use ew_rates::{EventSampler, IsolatedNodePolicy, RateModel};
use ew_schedule::EventQueue;

use crate::{Recorder, Sim, SimError, SimPhase, SimResult};

/// Fluent builder for [`Sim<G, M>`].
///
/// # Required inputs
///
/// - `G: Graph` — the static graph, e.g. [`ew_graph::AdjacencyGraph`]
/// - `M: RateModel` — e.g. [`ew_rates::MassActionRates`]
/// - `seed` — seeds the single random stream of the run
/// - a placement, via [`placement`](Self::placement), [`uniform`](Self::uniform)
///   or [`single_node`](Self::single_node)
///
/// # Optional inputs (have defaults)
///
/// | Method                        | Default                      |
/// |-------------------------------|------------------------------|
/// | `.infected_fraction(f)`       | `0.0`                        |
/// | `.isolated_node_policy(p)`    | `IsolatedNodePolicy::Park`   |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(graph, ConstantRates::new(1.0, 0.2, 0.1), 7)
///     .single_node(500, NodeId(10))
///     .infected_fraction(0.01)
///     .build()?;
/// sim.run(&RunConfig::logarithmic(100.0, 0.05), &mut NoopObserver)?;
/// ```
pub struct SimBuilder<G: Graph, M: RateModel> {
    graph:             G,
    model:             M,
    seed:              u64,
    placement:         Option<Placement>,
    infected_fraction: f64,
    policy:            IsolatedNodePolicy,
}

impl<G: Graph, M: RateModel> SimBuilder<G, M> {
    pub fn new(graph: G, model: M, seed: u64) -> Self {
        Self {
            graph,
            model,
            seed,
            placement:         None,
            infected_fraction: 0.0,
            policy:            IsolatedNodePolicy::default(),
        }
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    /// Place `agents` walkers on independent uniformly random nodes.
    pub fn uniform(self, agents: usize) -> Self {
        self.placement(Placement::Uniform { agents })
    }

    /// Place all `agents` walkers on `node`.
    pub fn single_node(self, agents: usize, node: NodeId) -> Self {
        self.placement(Placement::SingleNode { agents, node })
    }

    /// Fraction of walkers infected at start, in `[0, 1]`.  The count is
    /// `floor(agents * fraction)`, chosen without replacement.
    pub fn infected_fraction(mut self, fraction: f64) -> Self {
        self.infected_fraction = fraction;
        self
    }

    pub fn isolated_node_policy(mut self, policy: IsolatedNodePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Validate inputs, place and infect the walkers, and return an idle
    /// [`Sim`].  No event is scheduled until [`Sim::run`].
    pub fn build(self) -> SimResult<Sim<G, M>> {
        let node_count = self.graph.node_count();
        if node_count == 0 {
            return Err(SimError::EmptyGraph);
        }
        self.model
            .validate()
            .map_err(|e| SimError::InvalidConfiguration(e.to_string()))?;

        // ── Validate placement and infection ──────────────────────────────
        let placement = self.placement.ok_or_else(|| {
            SimError::InvalidConfiguration("walker placement was not set".into())
        })?;
        let agent_count = placement.agent_count();
        if agent_count == 0 {
            return Err(SimError::InvalidConfiguration("agent count must be positive".into()));
        }
        if u32::try_from(agent_count).is_err() {
            return Err(SimError::InvalidConfiguration(format!(
                "{agent_count} walkers exceed the AgentId range"
            )));
        }
        if let Placement::SingleNode { node, .. } = placement {
            if !self.graph.contains(node) {
                return Err(SimError::InvalidConfiguration(format!(
                    "start {node} is not in a graph of {node_count} nodes"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.infected_fraction) {
            return Err(SimError::InvalidConfiguration(format!(
                "infected fraction must lie in [0, 1], got {}",
                self.infected_fraction
            )));
        }

        // ── Place, then infect, from the one random stream ────────────────
        let mut rng = SimRng::new(self.seed);
        let mut agents = AgentStoreBuilder::new(node_count, placement).build(&mut rng)?;
        agents.infect_fraction(self.infected_fraction, &mut rng)?;

        Ok(Sim {
            sampler:  EventSampler::new(self.policy),
            queue:    EventQueue::with_capacity(agent_count),
            clock:    SimClock::new(),
            recorder: Recorder::new(node_count, agent_count),
            phase:    SimPhase::Idle,
            parked:   vec![false; agent_count],
            events_applied: 0,
            graph:    self.graph,
            model:    self.model,
            agents,
            rng,
        })
    }
}
