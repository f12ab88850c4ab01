//! Best-first route search over (stop, route) states.
//!
//! The search is A* with the straight-line distance to the goal as its
//! heuristic. Ride edges cost the great-circle distance between adjacent
//! stops, so by the triangle inequality the heuristic drops by at most
//! the edge cost along a ride. Transfer edges stay at the same stop and
//! cost a non-negative penalty. The heuristic is therefore consistent and
//! the first goal state popped from the frontier is optimal.

use tracing::{debug, trace, warn};

use crate::domain::{PathReport, RouteId, StopId};
use crate::graph::TransitGraph;

use super::cancel::CancelFlag;
use super::config::SearchConfig;
use super::frontier::{Frontier, FrontierEntry};
use super::log::{CapacityExceeded, LogEntry, SearchLog};
use super::memo::{CostMemo, StateKey};

/// Error from route search.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// The frontier emptied before the goal was reached
    #[error("no route found")]
    NotFound,

    /// Invalid search request
    #[error("invalid search request: {0}")]
    InvalidRequest(String),

    /// The search log or frontier hit its configured bound
    #[error(transparent)]
    CapacityExceeded(#[from] CapacityExceeded),

    /// The caller cancelled the search
    #[error("search cancelled")]
    Cancelled,
}

/// Request for route search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRequest {
    /// Stop the itinerary starts at.
    pub start: StopId,

    /// Stop the itinerary ends at.
    pub goal: StopId,
}

impl RouteRequest {
    /// Create a new route request.
    pub fn new(start: StopId, goal: StopId) -> Self {
        Self { start, goal }
    }

    /// Validate the request against the graph it will run on.
    pub fn validate(&self, graph: &TransitGraph) -> Result<(), SearchError> {
        for (label, stop) in [("start", self.start), ("goal", self.goal)] {
            if graph.stop(stop).is_err() {
                return Err(SearchError::InvalidRequest(format!(
                    "{label} stop {stop} is not in the network"
                )));
            }
        }

        if self.start == self.goal {
            return Err(SearchError::InvalidRequest(
                "start and goal are the same stop".to_string(),
            ));
        }

        Ok(())
    }
}

/// Counters describing the work a search did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States written to the search log, seeds included.
    pub states_generated: usize,

    /// States popped and expanded.
    pub states_expanded: usize,

    /// Expansions skipped because the state's route was missing from the
    /// graph or did not list the state's stop.
    pub data_inconsistencies: usize,
}

/// Result of route search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The optimal itinerary.
    pub report: PathReport,

    /// Work counters for this query.
    pub stats: SearchStats,
}

/// Query-local search state. Never shared between queries.
struct SearchContext<'g> {
    graph: &'g TransitGraph,
    transfer_penalty: f64,
    memo: CostMemo,
    frontier: Frontier<'g>,
    log: SearchLog,
    stats: SearchStats,
}

impl<'g> SearchContext<'g> {
    fn new(graph: &'g TransitGraph, goal: StopId, config: &SearchConfig) -> Self {
        Self {
            graph,
            transfer_penalty: config.transfer_penalty,
            memo: CostMemo::new(),
            frontier: Frontier::new(graph, goal),
            log: SearchLog::new(config.max_log_entries),
            stats: SearchStats::default(),
        }
    }

    /// Seed one zero-cost state per route serving `start`.
    fn seed(&mut self, start: StopId) -> Result<(), SearchError> {
        for &route in self.graph.routes_serving(start) {
            self.memo.put(StateKey::new(route, start), 0.0);
            let log = self.log.push(LogEntry {
                stop: start,
                route,
                cost: 0.0,
                transfers: 0,
                parent: None,
            })?;
            self.frontier.push(FrontierEntry {
                stop: start,
                route,
                cost: 0.0,
                transfers: 0,
                log,
            });
        }
        Ok(())
    }

    /// A popped entry is stale if a cheaper path to its state was found
    /// after it was queued. Expanding it could not improve anything.
    fn is_stale(&self, entry: &FrontierEntry) -> bool {
        entry.cost > self.memo.get(&StateKey::new(entry.route, entry.stop))
    }

    /// Generate ride and transfer successors of `current`.
    fn expand(&mut self, current: &FrontierEntry) -> Result<(), SearchError> {
        let graph = self.graph;

        match graph.route(current.route) {
            Ok(route) if route.position(current.stop).is_some() => {
                for next in route.neighbours(current.stop) {
                    if let Err(e) = graph.stop(next) {
                        self.stats.data_inconsistencies += 1;
                        warn!(route = route.name(), error = %e, "skipping ride to missing stop");
                        continue;
                    }
                    let cost = current.cost + graph.distance(current.stop, next);
                    self.relax(current, next, current.route, cost, current.transfers)?;
                }
            }
            Ok(route) => {
                self.stats.data_inconsistencies += 1;
                warn!(
                    stop = graph.stop_name(current.stop),
                    route = route.name(),
                    "stop lists a route that does not visit it, skipping rides"
                );
            }
            Err(e) => {
                self.stats.data_inconsistencies += 1;
                warn!(
                    stop = graph.stop_name(current.stop),
                    error = %e,
                    "skipping expansion through missing route"
                );
                return Ok(());
            }
        }

        let penalty = self.transfer_penalty;
        for &other in graph.routes_serving(current.stop) {
            if other == current.route {
                continue;
            }
            self.relax(
                current,
                current.stop,
                other,
                current.cost + penalty,
                current.transfers + 1,
            )?;
        }

        Ok(())
    }

    /// Record a candidate if it strictly improves on the best known cost.
    fn relax(
        &mut self,
        parent: &FrontierEntry,
        stop: StopId,
        route: RouteId,
        cost: f64,
        transfers: usize,
    ) -> Result<(), SearchError> {
        let key = StateKey::new(route, stop);
        if cost >= self.memo.get(&key) {
            return Ok(());
        }

        self.memo.put(key, cost);
        let log = self.log.push(LogEntry {
            stop,
            route,
            cost,
            transfers,
            parent: Some(parent.log),
        })?;
        self.frontier.push(FrontierEntry {
            stop,
            route,
            cost,
            transfers,
            log,
        });
        Ok(())
    }
}

/// Route finder over a read-only transit graph.
///
/// Each call to [`Planner::find_route`] builds its own memo, frontier and
/// log, so one planner (or many planners over one graph) can serve
/// independent queries.
pub struct Planner<'a> {
    graph: &'a TransitGraph,
    config: &'a SearchConfig,
    cancel: Option<CancelFlag>,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(graph: &'a TransitGraph, config: &'a SearchConfig) -> Self {
        Self {
            graph,
            config,
            cancel: None,
        }
    }

    /// Check `flag` between iterations and stop with
    /// [`SearchError::Cancelled`] once it is raised.
    pub fn with_cancel(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled)
    }

    /// Find the minimum-cost itinerary from `request.start` to `request.goal`.
    pub fn find_route(&self, request: &RouteRequest) -> Result<SearchResult, SearchError> {
        request.validate(self.graph)?;

        let mut ctx = SearchContext::new(self.graph, request.goal, self.config);
        ctx.seed(request.start)?;

        let terminal = loop {
            if self.is_cancelled() {
                debug!(expanded = ctx.stats.states_expanded, "search cancelled");
                return Err(SearchError::Cancelled);
            }

            let Some(current) = ctx.frontier.pop() else {
                debug!(
                    start = self.graph.stop_name(request.start),
                    goal = self.graph.stop_name(request.goal),
                    expanded = ctx.stats.states_expanded,
                    "frontier exhausted"
                );
                return Err(SearchError::NotFound);
            };

            if current.stop == request.goal {
                break current;
            }

            if ctx.is_stale(&current) {
                continue;
            }

            trace!(
                stop = self.graph.stop_name(current.stop),
                route = self.graph.route_name(current.route),
                cost = current.cost,
                transfers = current.transfers,
                "expanding state"
            );
            ctx.stats.states_expanded += 1;
            ctx.expand(&current)?;
        };

        ctx.stats.states_generated = ctx.log.len();
        let steps = ctx.log.path_to(terminal.log);
        let report = PathReport::assemble(&steps, terminal.transfers, terminal.cost, |a, b| {
            self.graph.distance(a, b)
        })
        .ok_or(SearchError::NotFound)?;

        debug!(
            legs = report.leg_count(),
            transfers = report.transfers(),
            distance_km = report.total_distance_km(),
            generated = ctx.stats.states_generated,
            expanded = ctx.stats.states_expanded,
            "route found"
        );

        Ok(SearchResult {
            report,
            stats: ctx.stats,
        })
    }
}
