//! The transit network model.
//!
//! A [`TransitGraph`] holds every stop and route of the network. It is
//! built once (by [`GraphBuilder`] or the CSV loader) and is read-only
//! afterwards, so it can be shared across concurrent queries behind an
//! `Arc` without locking.

mod builder;

pub use builder::GraphBuilder;

use std::collections::HashMap;

use crate::domain::{Route, RouteId, Stop, StopId};

/// Errors raised when the graph does not hold data a caller referenced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A stop lists a route the graph does not contain
    #[error("route {0:?} is not in the graph")]
    UnknownRoute(RouteId),

    /// A stop identifier is out of range
    #[error("stop {0:?} is not in the graph")]
    UnknownStop(StopId),
}

/// Immutable network of stops and routes.
#[derive(Debug, Clone, Default)]
pub struct TransitGraph {
    stops: Vec<Stop>,
    routes: Vec<Route>,
    stops_by_name: HashMap<String, StopId>,
    routes_by_name: HashMap<String, RouteId>,
}

impl TransitGraph {
    /// Assemble a graph from already-indexed stops and routes.
    ///
    /// Stop and route identifiers must equal their position in the
    /// vectors. The back-reference invariant (every stop on a route lists
    /// that route) is assumed, not checked; a stop that lists a missing
    /// route surfaces later as [`GraphError::UnknownRoute`], and a route
    /// that lists a missing stop as [`GraphError::UnknownStop`].
    pub fn from_parts(stops: Vec<Stop>, routes: Vec<Route>) -> Self {
        let stops_by_name = stops
            .iter()
            .map(|s| (s.name().to_string(), s.id()))
            .collect();
        let routes_by_name = routes
            .iter()
            .map(|r| (r.name().to_string(), r.id()))
            .collect();
        Self {
            stops,
            routes,
            stops_by_name,
            routes_by_name,
        }
    }

    /// Number of stops.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Number of routes.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// All stops, in identifier order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// All routes, in identifier order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Look up a stop by identifier.
    pub fn stop(&self, id: StopId) -> Result<&Stop, GraphError> {
        self.stops.get(id.0).ok_or(GraphError::UnknownStop(id))
    }

    /// Look up a stop by its exact name.
    pub fn stop_by_name(&self, name: &str) -> Option<&Stop> {
        self.stops_by_name.get(name).map(|id| &self.stops[id.0])
    }

    /// Look up a route by identifier.
    ///
    /// Fails with [`GraphError::UnknownRoute`] instead of panicking when
    /// the graph is malformed.
    pub fn route(&self, id: RouteId) -> Result<&Route, GraphError> {
        self.routes.get(id.0).ok_or(GraphError::UnknownRoute(id))
    }

    /// Look up a route by its exact name.
    pub fn route_by_name(&self, name: &str) -> Option<&Route> {
        self.routes_by_name.get(name).map(|id| &self.routes[id.0])
    }

    /// Routes serving a stop. Empty for unknown stops.
    pub fn routes_serving(&self, stop: StopId) -> &[RouteId] {
        self.stops.get(stop.0).map(Stop::routes).unwrap_or(&[])
    }

    /// Display name of a stop, or a placeholder for unknown identifiers.
    pub fn stop_name(&self, id: StopId) -> &str {
        self.stops.get(id.0).map(Stop::name).unwrap_or("<unknown stop>")
    }

    /// Display name of a route, or a placeholder for unknown identifiers.
    pub fn route_name(&self, id: RouteId) -> &str {
        self.routes.get(id.0).map(Route::name).unwrap_or("<unknown route>")
    }

    /// Great-circle distance between two stops in kilometres.
    ///
    /// Unknown stops yield zero. Identifiers read from a route may be
    /// dangling in a graph built with [`TransitGraph::from_parts`], so check
    /// them with [`TransitGraph::stop`] before pricing a ride.
    pub fn distance(&self, a: StopId, b: StopId) -> f64 {
        match (self.stops.get(a.0), self.stops.get(b.0)) {
            (Some(a), Some(b)) => a.location().haversine_km(b.location()),
            _ => 0.0,
        }
    }
}

/// Square grid of `side` x `side` stops, one route per row and per column,
/// plus an unserved "Island" stop as the last identifier.
#[cfg(test)]
pub(crate) fn grid_with_island(side: usize) -> TransitGraph {
    let mut b = GraphBuilder::new();
    let mut ids = Vec::with_capacity(side * side);
    for r in 0..side {
        for c in 0..side {
            let lat = 10.0 + r as f64 * 0.01;
            let lon = 10.0 + c as f64 * 0.01;
            ids.push(b.add_stop(&format!("R{r}C{c}"), lat, lon).unwrap());
        }
    }
    for r in 0..side {
        let row = (0..side).map(|c| (c as i64, ids[r * side + c])).collect();
        b.add_route(&format!("row-{r}"), row).unwrap();
    }
    for c in 0..side {
        let column = (0..side).map(|r| (r as i64, ids[r * side + c])).collect();
        b.add_route(&format!("col-{c}"), column).unwrap();
    }
    b.add_stop("Island", 60.0, 10.0).unwrap();
    b.build()
}
