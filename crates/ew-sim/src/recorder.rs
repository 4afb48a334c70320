//! Snapshot recording: the time series handed back to the caller.
//!
//! A snapshot copies three per-node/per-walker arrays out of the
//! [`AgentStore`].  Rows are appended to flat row-major [`Grid`]s, so
//! `series.node_log[s][n]` is the walker count at node `n` in snapshot `s`.

use std::ops::Index;

use ew_agent::AgentStore;
use ew_core::{NodeId, SimTime, SnapshotMode};

// ── Grid ──────────────────────────────────────────────────────────────────────

/// Row-major `rows × width` table with fixed width.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid<T> {
    width: usize,
    data:  Vec<T>,
}

impl<T: Clone> Grid<T> {
    pub fn new(width: usize) -> Self {
        Self { width, data: Vec::new() }
    }

    fn push_row(&mut self, row: &[T]) {
        debug_assert_eq!(row.len(), self.width);
        self.data.extend_from_slice(row);
    }
}

impl<T> Grid<T> {
    /// Entries per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        if self.width == 0 { 0 } else { self.data.len() / self.width }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn row(&self, i: usize) -> Option<&[T]> {
        (i < self.len()).then(|| &self.data[i * self.width..(i + 1) * self.width])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.len()).map(move |i| &self.data[i * self.width..(i + 1) * self.width])
    }

    /// One column across all rows.
    pub fn column(&self, col: usize) -> impl Iterator<Item = &T> + '_ {
        self.rows().filter_map(move |r| r.get(col))
    }

    /// The whole table, row-major.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T> Index<usize> for Grid<T> {
    type Output = [T];

    /// # Panics
    /// Panics if `row >= self.len()`.
    fn index(&self, row: usize) -> &[T] {
        &self.data[row * self.width..(row + 1) * self.width]
    }
}

// ── TimeSeries ────────────────────────────────────────────────────────────────

/// Everything recorded during a run, one row per snapshot.
///
/// All four sequences always have the same length.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSeries {
    /// Simulation time of each snapshot.
    pub timeline:     Vec<f64>,
    /// `[snapshot][node]` → walkers present.
    pub node_log:     Grid<u32>,
    /// `[snapshot][node]` → infected walkers present.
    pub infected_log: Grid<u32>,
    /// `[snapshot][agent]` → node of that walker.
    pub walker_log:   Grid<NodeId>,
}

impl TimeSeries {
    pub fn new(node_count: usize, agent_count: usize) -> Self {
        Self {
            timeline:     Vec::new(),
            node_log:     Grid::new(node_count),
            infected_log: Grid::new(node_count),
            walker_log:   Grid::new(agent_count),
        }
    }

    pub fn len(&self) -> usize {
        self.timeline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timeline.is_empty()
    }

    /// Total infected walkers in each snapshot.
    pub fn prevalence(&self) -> Vec<u32> {
        self.infected_log.rows().map(|r| r.iter().sum()).collect()
    }

    /// Walkers present at `node` in each snapshot.
    pub fn occupancy(&self, node: NodeId) -> Vec<u32> {
        self.node_log.column(node.index()).copied().collect()
    }

    /// Infected share of the walkers at `node` in each snapshot; `None` where
    /// the node was empty.
    pub fn infected_fraction(&self, node: NodeId) -> Vec<Option<f64>> {
        self.node_log
            .column(node.index())
            .zip(self.infected_log.column(node.index()))
            .map(|(&total, &infected)| {
                (total > 0).then(|| f64::from(infected) / f64::from(total))
            })
            .collect()
    }
}

// ── Recorder ──────────────────────────────────────────────────────────────────

/// Appends snapshots of the agent store to a [`TimeSeries`].
pub struct Recorder {
    series: TimeSeries,
}

impl Recorder {
    pub fn new(node_count: usize, agent_count: usize) -> Self {
        Self { series: TimeSeries::new(node_count, agent_count) }
    }

    /// Copy the current state of `agents` as a snapshot taken at `now`.
    pub fn record(&mut self, now: SimTime, agents: &AgentStore) {
        let counts = agents.counts();
        self.series.timeline.push(now.as_f64());
        self.series.node_log.push_row(counts.total());
        self.series.infected_log.push_row(counts.infected());
        self.series.walker_log.push_row(agents.positions());
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    pub fn into_series(self) -> TimeSeries {
        self.series
    }
}

// ── SnapshotSchedule ──────────────────────────────────────────────────────────

/// Decides when the next snapshot is due.
///
/// A snapshot is due once `mode.elapsed(last, now) > interval` (strictly).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SnapshotSchedule {
    mode:     SnapshotMode,
    interval: f64,
    last:     SimTime,
}

impl SnapshotSchedule {
    /// Schedule whose last snapshot was taken at `start`.
    pub fn new(mode: SnapshotMode, interval: f64, start: SimTime) -> Self {
        Self { mode, interval, last: start }
    }

    #[inline]
    pub fn is_due(&self, now: SimTime) -> bool {
        self.mode.elapsed(self.last, now) > self.interval
    }

    #[inline]
    pub fn mark(&mut self, now: SimTime) {
        self.last = now;
    }

    pub fn last(&self) -> SimTime {
        self.last
    }
}
