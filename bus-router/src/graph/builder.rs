//! Incremental construction of a consistent [`TransitGraph`].

use std::collections::HashMap;

use super::TransitGraph;
use crate::domain::{DomainError, GeoPoint, Route, RouteId, Stop, StopId};

/// Builder that maintains the stop/route back-reference invariant.
///
/// # Examples
///
/// ```
/// use bus_router::graph::GraphBuilder;
///
/// let mut builder = GraphBuilder::new();
/// let a = builder.add_stop("Colaba", 18.91, 72.81).unwrap();
/// let b = builder.add_stop("Churchgate", 18.93, 72.82).unwrap();
///
/// // Sequence numbers need not arrive in order.
/// let r = builder.add_route("123", vec![(2, b), (1, a)]).unwrap();
///
/// let graph = builder.build();
/// assert_eq!(graph.route(r).unwrap().stops(), &[a, b]);
/// assert_eq!(graph.routes_serving(a), &[r]);
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder {
    stops: Vec<Stop>,
    routes: Vec<Route>,
    stop_names: HashMap<String, StopId>,
    route_names: HashMap<String, RouteId>,
}

impl GraphBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stop. Names must be unique.
    pub fn add_stop(&mut self, name: &str, lat: f64, lon: f64) -> Result<StopId, DomainError> {
        let id = StopId(self.stops.len());
        let stop = Stop::new(id, name, GeoPoint::new(lat, lon)?)?;
        if self.stop_names.contains_key(stop.name()) {
            return Err(DomainError::DuplicateStop(stop.name().to_string()));
        }
        self.stop_names.insert(stop.name().to_string(), id);
        self.stops.push(stop);
        Ok(id)
    }

    /// Add a route from `(sequence index, stop)` pairs.
    ///
    /// Pairs are sorted by sequence index (stably, so equal indices keep
    /// their input order). Every listed stop gains this route in its set
    /// of serving routes.
    pub fn add_route(
        &mut self,
        name: &str,
        mut sequence: Vec<(i64, StopId)>,
    ) -> Result<RouteId, DomainError> {
        let id = RouteId(self.routes.len());
        let trimmed = name.trim();
        if self.route_names.contains_key(trimmed) {
            return Err(DomainError::DuplicateRoute(trimmed.to_string()));
        }
        if let Some(&(_, missing)) = sequence.iter().find(|(_, s)| s.0 >= self.stops.len()) {
            return Err(DomainError::UnknownStop {
                route: trimmed.to_string(),
                stop: missing.0,
            });
        }

        sequence.sort_by_key(|&(seq, _)| seq);
        let route = Route::new(id, trimmed, sequence.into_iter().map(|(_, s)| s).collect())?;

        for &stop in route.stops() {
            self.stops[stop.0].add_route(id);
        }
        self.route_names.insert(route.name().to_string(), id);
        self.routes.push(route);
        Ok(id)
    }

    /// Stops added so far.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Number of routes added so far.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Finish construction.
    pub fn build(self) -> TransitGraph {
        TransitGraph::from_parts(self.stops, self.routes)
    }
}
