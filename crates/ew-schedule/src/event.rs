//! Scheduled walker transitions.

use ew_core::{AgentId, NodeId, SimTime};

/// What happens to the walker when its event fires.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// Jump to neighbour `to`.
    Move { to: NodeId },
    /// Susceptible → Infected.
    Infect,
    /// Infected → Susceptible.
    Recover,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Move { .. } => "move",
            EventKind::Infect      => "infect",
            EventKind::Recover     => "recover",
        }
    }
}

/// A future transition for one walker, created by the rate model and consumed
/// exactly once by the engine.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub time:  SimTime,
    pub agent: AgentId,
    pub kind:  EventKind,
}

impl Event {
    pub fn new(time: SimTime, agent: AgentId, kind: EventKind) -> Self {
        Self { time, agent, kind }
    }

    /// `true` for an event scheduled at `+∞`, which can never fire.
    #[inline]
    pub fn is_never(&self) -> bool {
        !self.time.is_finite()
    }
}
