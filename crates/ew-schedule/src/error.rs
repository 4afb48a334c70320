use thiserror::Error;

use ew_core::AgentId;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("event for {0} has a NaN time")]
    NanTime(AgentId),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
