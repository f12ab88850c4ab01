//! Open set for best-first search.
//!
//! Entries are ordered by `f = g + h`, where `h` is the great-circle
//! distance from the entry's stop to the goal. Equal `f` values pop in
//! insertion order, which keeps path selection reproducible.
//!
//! The frontier itself is unbounded. Every entry is written to the
//! [`SearchLog`](super::SearchLog) before it is queued, so the log's bound
//! limits both.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::log::LogIndex;
use crate::domain::{RouteId, StopId};
use crate::graph::TransitGraph;

/// A generated state waiting to be expanded.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontierEntry {
    /// Stop of the state.
    pub stop: StopId,
    /// Route being ridden at `stop`.
    pub route: RouteId,
    /// Cost from the start (`g`), penalties included.
    pub cost: f64,
    /// Route changes so far.
    pub transfers: usize,
    /// This state's entry in the search log.
    pub log: LogIndex,
}

/// Heap slot: priority `f`, insertion sequence, payload.
#[derive(Debug)]
struct Queued {
    f: f64,
    seq: u64,
    entry: FrontierEntry,
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Queued {}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops smallest f, then earliest insert.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue of generated, not-yet-expanded states for one query.
pub struct Frontier<'g> {
    graph: &'g TransitGraph,
    goal: StopId,
    heap: BinaryHeap<Queued>,
    next_seq: u64,
}

impl<'g> Frontier<'g> {
    /// Create a frontier whose heuristic targets `goal`.
    pub fn new(graph: &'g TransitGraph, goal: StopId) -> Self {
        Self {
            graph,
            goal,
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Heuristic: straight-line distance from `stop` to the goal.
    ///
    /// Ignores route and transfers, so it never overestimates.
    pub fn heuristic(&self, stop: StopId) -> f64 {
        self.graph.distance(stop, self.goal)
    }

    /// Add an entry.
    pub fn push(&mut self, entry: FrontierEntry) {
        let f = entry.cost + self.heuristic(entry.stop);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Queued { f, seq, entry });
    }

    /// Remove the entry with the smallest `f`.
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop().map(|q| q.entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    /// Stops spread along the equator; the goal is the last one.
    fn line_graph() -> (TransitGraph, Vec<StopId>) {
        let mut b = GraphBuilder::new();
        let stops: Vec<_> = (0..4)
            .map(|i| b.add_stop(&format!("S{i}"), 0.0, i as f64).unwrap())
            .collect();
        (b.build(), stops)
    }

    fn entry(stop: StopId, cost: f64, log: usize) -> FrontierEntry {
        FrontierEntry {
            stop,
            route: RouteId(0),
            cost,
            transfers: 0,
            log: LogIndex(log),
        }
    }

    #[test]
    fn pops_smallest_f() {
        let (g, s) = line_graph();
        let mut frontier = Frontier::new(&g, s[3]);

        // f(S0) = 0 + 3 deg, f(S2) = 500 + 1 deg, f(S3) = 10 + 0
        frontier.push(entry(s[0], 0.0, 0));
        frontier.push(entry(s[2], 500.0, 1));
        frontier.push(entry(s[3], 10.0, 2));

        assert_eq!(frontier.pop().unwrap().log, LogIndex(2));
        assert_eq!(frontier.pop().unwrap().log, LogIndex(0));
        assert_eq!(frontier.pop().unwrap().log, LogIndex(1));
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn equal_f_pops_in_insertion_order() {
        let (g, s) = line_graph();
        let mut frontier = Frontier::new(&g, s[3]);

        for i in 0..50 {
            frontier.push(entry(s[3], 7.0, i));
        }
        let order: Vec<usize> = std::iter::from_fn(|| frontier.pop())
            .map(|e| e.log.0)
            .collect();
        assert_eq!(order, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn heuristic_is_distance_to_goal() {
        let (g, s) = line_graph();
        let frontier = Frontier::new(&g, s[3]);
        assert_eq!(frontier.heuristic(s[3]), 0.0);
        assert_eq!(frontier.heuristic(s[1]), g.distance(s[1], s[3]));
    }
}
