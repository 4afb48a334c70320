//! `EventSampler` — turns a walker's rates into its next [`Event`].

use ew_agent::AgentStore;
use ew_core::{AgentId, Health, SimRng, SimTime};
use ew_graph::Graph;
use ew_schedule::{Event, EventKind};
use tracing::trace;

use crate::RateModel;

/// What to do with a walker whose node has no neighbours.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IsolatedNodePolicy {
    /// The movement clock races as usual.  If it wins, the walker gets a
    /// `Move` to its own node at `t = +∞` and is never sampled again, so its
    /// infection and recovery clocks stop too.
    #[default]
    Park,
    /// The movement clock is still drawn but treated as `+∞`, so infection and
    /// recovery keep racing.  Only a walker with no finite clock is parked.
    EpidemicOnly,
}

/// Raw waiting times of the three clocks, relative to the sampling time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Clocks {
    pub movement:  f64,
    pub recovery:  f64,
    pub infection: f64,
}

/// Draws competing exponential clocks and selects the winning transition.
#[derive(Copy, Clone, Debug, Default)]
pub struct EventSampler {
    policy: IsolatedNodePolicy,
}

impl EventSampler {
    pub fn new(policy: IsolatedNodePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> IsolatedNodePolicy {
        self.policy
    }

    /// Draw all three clocks in the fixed order movement, recovery, infection.
    ///
    /// The clock that cannot apply to `health` is drawn anyway, so every
    /// sampled event consumes exactly three exponential draws.
    pub fn draw_clocks<M: RateModel>(
        &self,
        model:         &M,
        health:        Health,
        infected_here: u32,
        rng:           &mut SimRng,
    ) -> Clocks {
        let movement  = rng.exp_wait(model.movement_rate(health));
        let recovery  = rng.exp_wait(model.recovery_rate());
        let infection = rng.exp_wait(model.infection_rate(infected_here));
        Clocks { movement, recovery, infection }
    }

    /// Sample the next event for `agent` at clock time `now`.
    ///
    /// A strictly earlier epidemic clock wins over movement; a tie goes to
    /// movement.  The returned event is at `+∞` when the walker is parked.
    pub fn sample<M: RateModel, G: Graph>(
        &self,
        model: &M,
        graph: &G,
        store: &AgentStore,
        agent: AgentId,
        now:   SimTime,
        rng:   &mut SimRng,
    ) -> Event {
        let node   = store.position(agent);
        let health = store.health(agent);
        let clocks = self.draw_clocks(model, health, store.counts().infected_at(node), rng);

        let isolated = graph.is_isolated(node);
        let move_wait = match (isolated, self.policy) {
            (true, IsolatedNodePolicy::EpidemicOnly) => f64::INFINITY,
            _ => clocks.movement,
        };
        let (epi_wait, epi_kind) = match health {
            Health::Susceptible => (clocks.infection, EventKind::Infect),
            Health::Infected    => (clocks.recovery, EventKind::Recover),
        };

        let event = if epi_wait < move_wait {
            Event::new(now.after(epi_wait), agent, epi_kind)
        } else if isolated || move_wait == f64::INFINITY {
            Event::new(SimTime::INFINITY, agent, EventKind::Move { to: node })
        } else {
            match rng.choose(graph.neighbors(node)) {
                Some(&to) => Event::new(now.after(move_wait), agent, EventKind::Move { to }),
                None => Event::new(SimTime::INFINITY, agent, EventKind::Move { to: node }),
            }
        };

        trace!(
            agent = agent.0,
            node = node.0,
            kind = event.kind.as_str(),
            time = event.time.0,
            "sampled event"
        );
        event
    }
}
