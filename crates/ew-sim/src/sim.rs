//! The `Sim` struct and its event loop.

use std::fmt;

use ew_agent::AgentStore;
use ew_core::{AgentId, Health, RunConfig, SimClock, SimRng, SimTime};
use ew_graph::Graph;
use ew_rates::{EventSampler, RateModel};
use ew_schedule::{Event, EventKind, EventQueue};
use tracing::{debug, error, info, trace, warn};

use crate::{Recorder, SimError, SimObserver, SimResult, SnapshotSchedule, TimeSeries};

// ── SimPhase ──────────────────────────────────────────────────────────────────

/// Lifecycle of a [`Sim`].  Transitions only forward.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum SimPhase {
    /// Walkers placed and infected; no events scheduled yet.
    Idle,
    /// Inside [`Sim::run`].  A run that aborted with an error stays here.
    Running,
    /// The horizon was reached (or every walker is parked).
    Completed,
}

impl fmt::Display for SimPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SimPhase::Idle      => "idle",
            SimPhase::Running   => "running",
            SimPhase::Completed => "completed",
        })
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The simulation engine.
///
/// `Sim<G, M>` owns the graph, the rate model, the walkers, the event queue,
/// the clock, the random stream and the recorder.  It is the only writer of
/// any of them.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<G: Graph, M: RateModel> {
    pub(crate) graph:    G,
    pub(crate) model:    M,
    pub(crate) sampler:  EventSampler,
    pub(crate) agents:   AgentStore,
    pub(crate) queue:    EventQueue,
    pub(crate) clock:    SimClock,
    pub(crate) rng:      SimRng,
    pub(crate) recorder: Recorder,
    pub(crate) phase:    SimPhase,
    /// One flag per walker; set once its pending event is at `+∞`.
    pub(crate) parked:   Vec<bool>,
    pub(crate) events_applied: u64,
}

impl<G: Graph, M: RateModel> Sim<G, M> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from `t = 0` until the clock reaches `config.horizon`.
    ///
    /// The loop condition is checked before each pop, so the last applied
    /// event may lie past the horizon.  If every pending event is at `+∞` the
    /// run ends early.  A `Sim` runs once; a second call is
    /// [`SimError::InvalidPhase`].
    pub fn run<O: SimObserver>(&mut self, config: &RunConfig, observer: &mut O) -> SimResult<()> {
        if self.phase != SimPhase::Idle {
            return Err(SimError::InvalidPhase { expected: SimPhase::Idle, found: self.phase });
        }
        config
            .validate()
            .map_err(|e| SimError::InvalidConfiguration(e.to_string()))?;
        self.phase = SimPhase::Running;

        info!(
            agents = self.agents.len(),
            nodes = self.graph.node_count(),
            infected = self.agents.infected_count(),
            horizon = config.horizon,
            snapshot_mode = %config.snapshot_mode,
            snapshot_interval = config.snapshot_interval,
            "starting run"
        );

        // ── Schedule one event per walker ─────────────────────────────────
        for i in 0..self.agents.len() {
            self.schedule(AgentId(i as u32), observer)?;
        }
        self.check_queue()?;
        observer.on_run_start(config, &self.agents);

        let start = self.clock.now();
        let end = start.after(config.horizon);
        let mut cadence = SnapshotSchedule::new(config.snapshot_mode, config.snapshot_interval, start);
        self.snapshot(start, observer);

        // ── Event loop ────────────────────────────────────────────────────
        while self.clock.now() < end {
            self.check_queue()?;
            match self.queue.peek_time() {
                Some(t) if t.is_finite() => {}
                Some(_) => {
                    info!(time = self.clock.now().0, "every walker is parked; stopping early");
                    break;
                }
                None => return Err(self.queue_violation()),
            }
            let Some(event) = self.queue.pop() else {
                return Err(self.queue_violation());
            };

            self.clock.advance_to(event.time)?;
            self.apply(&event)?;
            self.events_applied += 1;
            self.schedule(event.agent, observer)?;
            self.check_queue()?;
            observer.on_event(&event, self.queue.len());

            let now = self.clock.now();
            if cadence.is_due(now) {
                cadence.mark(now);
                self.snapshot(now, observer);
            }
        }

        self.phase = SimPhase::Completed;
        observer.on_sim_end(self.clock.now(), self.events_applied);
        info!(
            time = self.clock.now().0,
            events = self.events_applied,
            snapshots = self.recorder.len(),
            parked = self.parked_agents().count(),
            "run completed"
        );
        Ok(())
    }

    /// Current clock value.
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    /// Number of events popped and applied so far.
    pub fn events_applied(&self) -> u64 {
        self.events_applied
    }

    /// Read-only view of the walkers and node aggregates.
    pub fn agents(&self) -> &AgentStore {
        &self.agents
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Number of pending events.  Equals the agent count once running.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Walkers whose pending event is at `+∞`, ascending.
    pub fn parked_agents(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.parked
            .iter()
            .enumerate()
            .filter(|(_, p)| **p)
            .map(|(i, _)| AgentId(i as u32))
    }

    /// The snapshots recorded so far.
    pub fn series(&self) -> &TimeSeries {
        self.recorder.series()
    }

    pub fn into_series(self) -> TimeSeries {
        self.recorder.into_series()
    }

    // ── Event handling ────────────────────────────────────────────────────

    fn apply(&mut self, event: &Event) -> SimResult<()> {
        trace!(
            agent = event.agent.0,
            kind = event.kind.as_str(),
            time = event.time.0,
            "applying event"
        );
        match event.kind {
            EventKind::Move { to } => {
                self.agents.move_agent(event.agent, to)?;
            }
            EventKind::Infect => {
                self.agents.set_health(event.agent, Health::Infected)?;
            }
            EventKind::Recover => {
                self.agents.set_health(event.agent, Health::Susceptible)?;
            }
        }
        Ok(())
    }

    /// Sample and push the next event for `agent`.
    fn schedule<O: SimObserver>(&mut self, agent: AgentId, observer: &mut O) -> SimResult<()> {
        let event = self.sampler.sample(
            &self.model,
            &self.graph,
            &self.agents,
            agent,
            self.clock.now(),
            &mut self.rng,
        );
        if event.is_never() && !self.parked[agent.index()] {
            self.parked[agent.index()] = true;
            let node = self.agents.position(agent);
            if self.graph.is_isolated(node) {
                warn!(agent = agent.0, node = node.0, "walker parked on an isolated node");
            } else {
                debug!(agent = agent.0, node = node.0, "walker has no enabled clock");
            }
            observer.on_agent_parked(agent, node);
        }
        self.queue.push(event)?;
        Ok(())
    }

    fn snapshot<O: SimObserver>(&mut self, now: SimTime, observer: &mut O) {
        self.recorder.record(now, &self.agents);
        debug!(time = now.0, snapshot = self.recorder.len(), "recorded snapshot");
        observer.on_snapshot(now, &self.agents);
    }

    // ── Invariants ────────────────────────────────────────────────────────

    fn check_queue(&self) -> SimResult<()> {
        if self.queue.len() == self.agents.len() {
            Ok(())
        } else {
            Err(self.queue_violation())
        }
    }

    fn queue_violation(&self) -> SimError {
        let err = SimError::QueueInvariantViolation {
            expected: self.agents.len(),
            found:    self.queue.len(),
            time:     self.clock.now(),
        };
        error!(%err, "aborting run");
        err
    }
}
