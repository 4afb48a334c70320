//! `EventQueue` — global time-ordered queue of pending walker events.
//!
//! # Ordering
//!
//! `BinaryHeap` is a max-heap, so [`Entry`]'s `Ord` is reversed: the entry with
//! the smallest time compares greatest.  Equal times (probability zero for
//! continuous clocks, but common for `+∞`) fall back to insertion order via a
//! monotonically increasing sequence number, which keeps runs deterministic.
//!
//! O(log n) push and pop; n is the agent count.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ew_core::SimTime;

use crate::{Event, ScheduleError, ScheduleResult};

struct Entry {
    seq:   u64,
    event: Event,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .event
            .time
            .total_cmp(&self.event.time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// Min-priority queue of [`Event`]s keyed by time, FIFO among equal times.
#[derive(Default)]
pub struct EventQueue {
    heap:     BinaryHeap<Entry>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { heap: BinaryHeap::with_capacity(capacity), next_seq: 0 }
    }

    /// Schedule `event`.  `+∞` is accepted; NaN is rejected.
    pub fn push(&mut self, event: Event) -> ScheduleResult<()> {
        if event.time.0.is_nan() {
            return Err(ScheduleError::NanTime(event.agent));
        }
        self.heap.push(Entry { seq: self.next_seq, event });
        self.next_seq += 1;
        Ok(())
    }

    /// Remove and return the earliest event.
    pub fn pop(&mut self) -> Option<Event> {
        self.heap.pop().map(|e| e.event)
    }

    /// The earliest event without removing it.
    pub fn peek(&self) -> Option<&Event> {
        self.heap.peek().map(|e| &e.event)
    }

    pub fn peek_time(&self) -> Option<SimTime> {
        self.peek().map(|e| e.time)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Total number of events ever pushed.
    pub fn pushed(&self) -> u64 {
        self.next_seq
    }
}
