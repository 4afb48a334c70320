//! `ew-schedule` — pending walker events and the queue that orders them.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                  |
//! |-----------|-----------------------------------------------------------|
//! | [`event`] | `Event`, `EventKind` (`Move` / `Infect` / `Recover`)      |
//! | [`queue`] | `EventQueue` (`BinaryHeap` min-queue, FIFO on ties)       |
//! | [`error`] | `ScheduleError`, `ScheduleResult<T>`                      |
//!
//! # Queue model (summary)
//!
//! Every walker owns exactly one pending event.  The engine pops the earliest
//! event, applies it, and pushes the walker's replacement, so the queue length
//! equals the agent count between iterations.  Events are never edited or
//! removed in place.

pub mod error;
pub mod event;
pub mod queue;


pub use error::{ScheduleError, ScheduleResult};
pub use event::{Event, EventKind};
pub use queue::EventQueue;
