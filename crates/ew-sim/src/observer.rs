//! Simulation observer trait for progress reporting and data collection.

use ew_agent::AgentStore;
use ew_core::{AgentId, NodeId, RunConfig, SimTime};
use ew_schedule::Event;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// event loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  The built-in [`Recorder`][crate::Recorder]
/// runs regardless of the observer; observers are for extra instrumentation.
///
/// # Example — event counter
///
/// ```rust
/// use ew_schedule::{Event, EventKind};
/// use ew_sim::SimObserver;
///
/// #[derive(Default)]
/// struct Infections(usize);
///
/// impl SimObserver for Infections {
///     fn on_event(&mut self, event: &Event, _queue_len: usize) {
///         if event.kind == EventKind::Infect {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once after every walker has its first event and before the
    /// initial snapshot.
    fn on_run_start(&mut self, _config: &RunConfig, _agents: &AgentStore) {}

    /// Called after `event` has been applied and the walker's next event has
    /// been pushed.  `queue_len` is the queue length at that point.
    fn on_event(&mut self, _event: &Event, _queue_len: usize) {}

    /// Called the first time a walker receives an event at `t = +∞`.
    fn on_agent_parked(&mut self, _agent: AgentId, _node: NodeId) {}

    /// Called every time a snapshot is appended to the time series.
    fn on_snapshot(&mut self, _time: SimTime, _agents: &AgentStore) {}

    /// Called once when the run completes.
    fn on_sim_end(&mut self, _final_time: SimTime, _events_applied: u64) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
