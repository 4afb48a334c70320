use ew_agent::AgentError;
use ew_core::{CoreError, SimTime};
use ew_schedule::ScheduleError;
use thiserror::Error;

use crate::SimPhase;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("graph has no nodes")]
    EmptyGraph,

    #[error("simulation is {found}, expected {expected}")]
    InvalidPhase { expected: SimPhase, found: SimPhase },

    #[error("event queue holds {found} events but there are {expected} walkers (at {time})")]
    QueueInvariantViolation {
        expected: usize,
        found:    usize,
        time:     SimTime,
    },

    #[error("agent store error: {0}")]
    Agent(#[from] AgentError),

    #[error("event queue error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("clock error: {0}")]
    Clock(#[from] CoreError),
}

pub type SimResult<T> = Result<T, SimError>;
