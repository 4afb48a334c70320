//! Integration tests for ew-sim.

use ew_agent::AgentStore;
use ew_core::{AgentId, NodeId, RunConfig, SimTime};
use ew_graph::{AdjacencyGraph, Graph};
use ew_rates::{ConstantRates, MassActionRates, RateModel};
use ew_schedule::{Event, EventKind};

use crate::{NoopObserver, Sim, SimBuilder, SimObserver, TimeSeries};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn ring(n: u32) -> AdjacencyGraph {
    AdjacencyGraph::from_edges(n as usize, (0..n).map(|i| (i, (i + 1) % n))).unwrap()
}

/// Two 5-cliques joined by a single bridge 4-5.
fn two_communities() -> AdjacencyGraph {
    let mut edges = Vec::new();
    for base in [0u32, 5] {
        for a in base..base + 5 {
            for b in a + 1..base + 5 {
                edges.push((a, b));
            }
        }
    }
    edges.push((4, 5));
    AdjacencyGraph::from_edges(10, edges).unwrap()
}

fn isolated_single_node() -> AdjacencyGraph {
    AdjacencyGraph::from_edges(1, std::iter::empty()).unwrap()
}

fn epidemic_sim(seed: u64) -> Sim<AdjacencyGraph, MassActionRates> {
    SimBuilder::new(two_communities(), MassActionRates::new(0.3, 0.3, 0.2, 0.1), seed)
        .uniform(300)
        .infected_fraction(0.05)
        .build()
        .unwrap()
}

/// Checks the aggregate properties every recorded series must satisfy.
fn assert_series_consistent(series: &TimeSeries, agents: usize) {
    assert_eq!(series.timeline.len(), series.node_log.len());
    assert_eq!(series.timeline.len(), series.infected_log.len());
    assert_eq!(series.timeline.len(), series.walker_log.len());
    for (s, (totals, infected)) in series.node_log.rows().zip(series.infected_log.rows()).enumerate() {
        assert_eq!(totals.iter().sum::<u32>() as usize, agents, "snapshot {s}");
        for (t, i) in totals.iter().zip(infected) {
            assert!(i <= t, "snapshot {s}: infected {i} > total {t}");
        }
    }
    assert!(series.timeline.windows(2).all(|w| w[0] <= w[1]), "timeline not sorted");
}

/// Observer that records everything it is told.
#[derive(Default)]
struct Recording {
    queue_lens: Vec<usize>,
    events:     Vec<Event>,
    parked:     Vec<(AgentId, NodeId)>,
    snapshots:  usize,
    started:    bool,
    ended:      Option<(SimTime, u64)>,
}

impl SimObserver for Recording {
    fn on_run_start(&mut self, _c: &RunConfig, _a: &AgentStore) {
        self.started = true;
    }
    fn on_event(&mut self, event: &Event, queue_len: usize) {
        self.events.push(*event);
        self.queue_lens.push(queue_len);
    }
    fn on_agent_parked(&mut self, agent: AgentId, node: NodeId) {
        self.parked.push((agent, node));
    }
    fn on_snapshot(&mut self, _t: SimTime, _a: &AgentStore) {
        self.snapshots += 1;
    }
    fn on_sim_end(&mut self, t: SimTime, n: u64) {
        self.ended = Some((t, n));
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::{SimError, SimPhase};
    use ew_rates::IsolatedNodePolicy;

    #[test]
    fn builds_idle_with_placed_and_infected_walkers() {
        let sim = epidemic_sim(1);
        assert_eq!(sim.phase(), SimPhase::Idle);
        assert_eq!(sim.agents().len(), 300);
        assert_eq!(sim.agents().infected_count(), 15);
        assert_eq!(sim.pending_events(), 0, "nothing is scheduled before run");
        assert!(sim.series().is_empty());
        sim.agents().check_invariants().unwrap();
    }

    #[test]
    fn empty_graph_errors() {
        let graph = AdjacencyGraph::from_edges(0, std::iter::empty()).unwrap();
        let result = SimBuilder::new(graph, ConstantRates::movement_only(1.0), 0).uniform(3).build();
        assert!(matches!(result, Err(SimError::EmptyGraph)));
    }

    #[test]
    fn zero_agents_errors() {
        let result = SimBuilder::new(ring(4), ConstantRates::movement_only(1.0), 0).uniform(0).build();
        assert!(matches!(result, Err(SimError::InvalidConfiguration(_))));
    }

    #[test]
    fn missing_placement_errors() {
        let result = SimBuilder::new(ring(4), ConstantRates::movement_only(1.0), 0).build();
        assert!(matches!(result, Err(SimError::InvalidConfiguration(_))));
    }

    #[test]
    fn invalid_rate_errors() {
        let result = SimBuilder::new(ring(4), ConstantRates::new(1.0, -0.5, 0.1), 0)
            .uniform(3)
            .build();
        assert!(matches!(result, Err(SimError::InvalidConfiguration(_))));
    }

    #[test]
    fn bad_start_node_and_fraction_error() {
        let r = SimBuilder::new(ring(4), ConstantRates::movement_only(1.0), 0)
            .single_node(3, NodeId(4))
            .build();
        assert!(matches!(r, Err(SimError::InvalidConfiguration(_))));

        let r = SimBuilder::new(ring(4), ConstantRates::movement_only(1.0), 0)
            .uniform(3)
            .infected_fraction(1.01)
            .build();
        assert!(matches!(r, Err(SimError::InvalidConfiguration(_))));
    }

    #[test]
    fn policy_is_carried_into_the_sampler() {
        let sim = SimBuilder::new(ring(4), ConstantRates::movement_only(1.0), 0)
            .uniform(2)
            .isolated_node_policy(IsolatedNodePolicy::EpidemicOnly)
            .build()
            .unwrap();
        assert_eq!(sim.sampler.policy(), IsolatedNodePolicy::EpidemicOnly);
    }
}

// ── Lifecycle and failure semantics ───────────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use super::*;
    use crate::{SimError, SimPhase};

    #[test]
    fn run_completes_and_cannot_rerun() {
        let mut sim = epidemic_sim(2);
        sim.run(&RunConfig::linear(5.0, 0.5), &mut NoopObserver).unwrap();
        assert_eq!(sim.phase(), SimPhase::Completed);
        assert!(sim.now() >= SimTime(5.0));
        assert_eq!(sim.pending_events(), 300);

        let again = sim.run(&RunConfig::linear(5.0, 0.5), &mut NoopObserver);
        assert!(matches!(
            again,
            Err(SimError::InvalidPhase { expected: SimPhase::Idle, found: SimPhase::Completed })
        ));
    }

    #[test]
    fn non_positive_horizon_is_rejected_before_running() {
        let mut sim = epidemic_sim(3);
        for horizon in [0.0, -1.0, f64::NAN] {
            let r = sim.run(&RunConfig::linear(horizon, 0.1), &mut NoopObserver);
            assert!(matches!(r, Err(SimError::InvalidConfiguration(_))), "horizon {horizon}");
        }
        assert_eq!(sim.phase(), SimPhase::Idle);
        assert_eq!(sim.pending_events(), 0);
        assert!(sim.series().is_empty());
    }

    #[test]
    fn corrupted_queue_aborts_the_run() {
        let mut sim = epidemic_sim(4);
        // A stray event makes the queue one longer than the population.
        sim.queue
            .push(Event::new(SimTime(1.0), AgentId(0), EventKind::Infect))
            .unwrap();
        let r = sim.run(&RunConfig::linear(5.0, 0.1), &mut NoopObserver);
        assert!(matches!(
            r,
            Err(SimError::QueueInvariantViolation { expected: 300, found: 301, .. })
        ));
        assert_ne!(sim.phase(), SimPhase::Completed);
        assert!(sim.series().is_empty(), "no snapshot after a failed start");
    }

    #[test]
    fn observer_sees_the_whole_run() {
        let mut sim = epidemic_sim(5);
        let mut obs = Recording::default();
        sim.run(&RunConfig::linear(3.0, 0.25), &mut obs).unwrap();
        assert!(obs.started);
        assert_eq!(obs.events.len() as u64, sim.events_applied());
        assert_eq!(obs.snapshots, sim.series().len());
        assert_eq!(obs.ended, Some((sim.now(), sim.events_applied())));
    }
}

// ── Invariants and output shape ───────────────────────────────────────────────

#[cfg(test)]
mod invariants {
    use super::*;

    #[test]
    fn queue_length_equals_population_after_every_event() {
        let mut sim = epidemic_sim(6);
        let mut obs = Recording::default();
        sim.run(&RunConfig::linear(10.0, 0.1), &mut obs).unwrap();
        assert!(!obs.queue_lens.is_empty());
        assert!(obs.queue_lens.iter().all(|&n| n == 300));
    }

    #[test]
    fn series_is_consistent_and_aggregates_match_store() {
        let mut sim = epidemic_sim(7);
        sim.run(&RunConfig::linear(10.0, 0.1), &mut NoopObserver).unwrap();
        assert_series_consistent(sim.series(), 300);
        sim.agents().check_invariants().unwrap();
    }

    #[test]
    fn event_times_never_decrease() {
        let mut sim = epidemic_sim(8);
        let mut obs = Recording::default();
        sim.run(&RunConfig::linear(10.0, 1.0), &mut obs).unwrap();
        assert!(obs.events.windows(2).all(|w| w[0].time <= w[1].time));
        assert!(obs.events.iter().all(|e| e.time.is_finite()));
    }

    #[test]
    fn initial_snapshot_is_at_time_zero() {
        let mut sim = epidemic_sim(9);
        let before: Vec<NodeId> = sim.agents().positions().to_vec();
        let infected_before: Vec<u32> = sim.agents().counts().infected().to_vec();
        sim.run(&RunConfig::linear(1.0, 0.1), &mut NoopObserver).unwrap();
        let series = sim.series();
        assert_eq!(series.timeline[0], 0.0);
        assert_eq!(&series.walker_log[0], before.as_slice());
        assert_eq!(&series.infected_log[0], infected_before.as_slice());
        assert_eq!(series.prevalence()[0], 15);
    }

    #[test]
    fn zero_infection_rate_keeps_infected_log_constant() {
        let mut sim = SimBuilder::new(two_communities(), ConstantRates::new(1.0, 0.0, 0.5), 10)
            .uniform(100)
            .build()
            .unwrap();
        sim.run(&RunConfig::linear(20.0, 0.1), &mut NoopObserver).unwrap();
        let series = sim.series();
        assert!(series.len() > 10);
        let first = series.infected_log[0].to_vec();
        assert!(series.infected_log.rows().all(|r| r == first.as_slice()));
    }

    #[test]
    fn zero_infection_and_recovery_conserve_prevalence() {
        let mut sim = SimBuilder::new(two_communities(), ConstantRates::new(1.0, 0.0, 0.0), 11)
            .uniform(100)
            .infected_fraction(0.25)
            .build()
            .unwrap();
        sim.run(&RunConfig::linear(20.0, 0.1), &mut NoopObserver).unwrap();
        assert!(sim.series().prevalence().iter().all(|&p| p == 25));
    }
}

// ── Snapshot cadence ──────────────────────────────────────────────────────────

#[cfg(test)]
mod cadence {
    use super::*;

    #[test]
    fn linear_snapshots_are_more_than_interval_apart() {
        let mut sim = epidemic_sim(12);
        sim.run(&RunConfig::linear(10.0, 0.5), &mut NoopObserver).unwrap();
        let t = &sim.series().timeline;
        assert!(t.len() > 5);
        assert!(t.windows(2).all(|w| w[1] - w[0] > 0.5), "{t:?}");
    }

    #[test]
    fn log_snapshots_are_more_than_interval_apart_in_log_time() {
        let mut sim = epidemic_sim(13);
        sim.run(&RunConfig::logarithmic(10.0, 0.1), &mut NoopObserver).unwrap();
        let t = &sim.series().timeline;
        assert!(t.len() > 3);
        assert_eq!(t[0], 0.0);
        assert!(t[1] > 0.0, "the first applied event is always recorded");
        assert!(t[1..].windows(2).all(|w| w[1].ln() - w[0].ln() > 0.1), "{t:?}");
    }

    #[test]
    fn zero_interval_records_every_event() {
        let mut sim = epidemic_sim(14);
        sim.run(&RunConfig::linear(2.0, 0.0), &mut NoopObserver).unwrap();
        assert_eq!(sim.series().len() as u64, sim.events_applied() + 1);
    }
}

// ── Determinism ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod determinism {
    use super::*;

    fn run(seed: u64) -> TimeSeries {
        let mut sim = epidemic_sim(seed);
        sim.run(&RunConfig::logarithmic(15.0, 0.01), &mut NoopObserver).unwrap();
        sim.into_series()
    }

    #[test]
    fn same_seed_same_series() {
        let a = run(77);
        let b = run(77);
        assert_eq!(a, b);
        let bits = |s: &TimeSeries| s.timeline.iter().map(|t| t.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn different_seed_different_series() {
        assert_ne!(run(77), run(78));
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use super::*;
    use crate::SimPhase;

    fn ring_walker(seed: u64) -> Sim<AdjacencyGraph, ConstantRates> {
        SimBuilder::new(ring(4), ConstantRates::movement_only(1.0), seed)
            .uniform(1)
            .build()
            .unwrap()
    }

    /// A: one walker on a 4-ring, movement only, rate 1, horizon 5.
    #[test]
    fn ring_walker_moves_between_neighbours_only() {
        let mut sim = ring_walker(5);
        sim.run(&RunConfig::linear(5.0, 0.0), &mut NoopObserver).unwrap();
        let graph = ring(4);
        let series = sim.series();
        assert!(series.len() >= 2);
        for w in series.walker_log.rows().collect::<Vec<_>>().windows(2) {
            let (from, to) = (w[0][0], w[1][0]);
            assert!(graph.neighbors(from).contains(&to), "{from} -> {to}");
        }
        assert!(series.infected_log.as_slice().iter().all(|&i| i == 0));
    }

    /// A: the number of jumps before the horizon is Poisson with mean 5.
    #[test]
    fn ring_walker_jump_count_has_poisson_mean() {
        let runs = 500;
        let mut total = 0usize;
        for seed in 0..runs {
            let mut sim = ring_walker(seed);
            sim.run(&RunConfig::linear(5.0, 0.0), &mut NoopObserver).unwrap();
            // Every jump is recorded; drop the t=0 row and the jump past 5.
            total += sim.series().timeline.iter().filter(|&&t| t > 0.0 && t < 5.0).count();
        }
        let mean = total as f64 / runs as f64;
        assert!((mean - 5.0).abs() < 0.35, "mean jumps {mean}");
    }

    /// B: two infected walkers on one node that can neither move nor recover.
    #[test]
    fn frozen_infected_pair_stays_put() {
        let graph = AdjacencyGraph::from_edges(1, std::iter::empty()).unwrap();
        let mut sim = SimBuilder::new(graph, ConstantRates::new(0.0, 1.0, 0.0), 0)
            .single_node(2, NodeId(0))
            .infected_fraction(1.0)
            .build()
            .unwrap();
        let mut obs = Recording::default();
        sim.run(&RunConfig::linear(10.0, 0.1), &mut obs).unwrap();

        assert_eq!(sim.phase(), SimPhase::Completed);
        assert_eq!(sim.events_applied(), 0);
        let series = sim.series();
        assert!(!series.is_empty());
        assert!(series.infected_log.rows().all(|r| r == [2]));
        assert!(series.node_log.rows().all(|r| r == [2]));
        assert_eq!(obs.parked.len(), 2);
    }

    /// B, on a connected graph with mass action: no movement, no recovery.
    #[test]
    fn frozen_infected_pair_on_connected_graph() {
        let mut sim = SimBuilder::new(ring(4), MassActionRates::new(0.0, 0.0, 1.0, 0.0), 3)
            .single_node(2, NodeId(2))
            .infected_fraction(1.0)
            .build()
            .unwrap();
        sim.run(&RunConfig::linear(10.0, 0.1), &mut NoopObserver).unwrap();
        assert!(sim.series().infected_log.rows().all(|r| r == [0, 0, 2, 0]));
    }

    /// C: one walker on an isolated node never moves and the run completes.
    #[test]
    fn isolated_walker_is_parked() {
        let mut sim = SimBuilder::new(isolated_single_node(), ConstantRates::movement_only(1.0), 9)
            .uniform(1)
            .build()
            .unwrap();
        let mut obs = Recording::default();
        sim.run(&RunConfig::linear(5.0, 0.1), &mut obs).unwrap();

        assert_eq!(sim.phase(), SimPhase::Completed);
        assert!(sim.series().walker_log.rows().all(|r| r == [NodeId(0)]));
        assert_eq!(sim.parked_agents().collect::<Vec<_>>(), vec![AgentId(0)]);
        assert_eq!(obs.parked, vec![(AgentId(0), NodeId(0))]);
        assert_eq!(sim.pending_events(), 1, "the parked event stays queued");
    }
}

// ── Isolated-node policy ──────────────────────────────────────────────────────

#[cfg(test)]
mod isolated_policy {
    use super::*;
    use ew_rates::IsolatedNodePolicy;

    /// Node 2 is isolated; every walker starts there infected.
    fn island_sim(policy: IsolatedNodePolicy) -> Sim<AdjacencyGraph, ConstantRates> {
        let graph = AdjacencyGraph::from_edges(3, [(0, 1)]).unwrap();
        SimBuilder::new(graph, ConstantRates::new(50.0, 0.0, 1.0), 21)
            .single_node(20, NodeId(2))
            .infected_fraction(1.0)
            .isolated_node_policy(policy)
            .build()
            .unwrap()
    }

    #[test]
    fn park_freezes_infection_on_islands() {
        let mut sim = island_sim(IsolatedNodePolicy::Park);
        sim.run(&RunConfig::linear(10.0, 0.1), &mut NoopObserver).unwrap();
        // Movement (rate 50) almost always beats recovery (rate 1): nearly
        // everyone is parked still infected.
        assert!(sim.parked_agents().count() >= 15);
        assert!(sim.agents().infected_count() >= 15);
    }

    #[test]
    fn epidemic_only_lets_walkers_recover_on_islands() {
        let mut sim = island_sim(IsolatedNodePolicy::EpidemicOnly);
        sim.run(&RunConfig::linear(10.0, 0.1), &mut NoopObserver).unwrap();
        // Recovery (mean 1) is the only clock; after 10 time units nearly
        // everyone has recovered and then has no enabled clock left.
        assert!(sim.agents().infected_count() <= 2);
        assert_eq!(sim.parked_agents().count() + sim.agents().infected_count(), 20);
    }
}

// ── Analysis helpers ──────────────────────────────────────────────────────────

#[cfg(test)]
mod analysis {
    use super::*;

    #[test]
    fn fractions_and_occupancy_line_up_with_logs() {
        let mut sim = epidemic_sim(30);
        sim.run(&RunConfig::linear(5.0, 0.5), &mut NoopObserver).unwrap();
        let series = sim.series();
        let node = NodeId(3);
        let occ = series.occupancy(node);
        let frac = series.infected_fraction(node);
        assert_eq!(occ.len(), series.len());
        assert_eq!(frac.len(), series.len());
        for (s, (o, f)) in occ.iter().zip(&frac).enumerate() {
            assert_eq!(*o, series.node_log[s][3]);
            match f {
                None => assert_eq!(*o, 0),
                Some(x) => {
                    let expect = f64::from(series.infected_log[s][3]) / f64::from(*o);
                    assert!((x - expect).abs() < 1e-12);
                }
            }
        }
    }

    #[test]
    fn rate_model_is_reachable_after_build() {
        let sim = epidemic_sim(31);
        assert_eq!(sim.model().recovery_rate(), 0.1);
        assert_eq!(sim.graph().node_count(), 10);
    }
}
