//! Bus route types.

use std::fmt;

use super::{DomainError, StopId};

/// Index of a route within a [`TransitGraph`](crate::graph::TransitGraph).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(pub usize);

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

/// A fixed bus route: a name and an ordered sequence of stops.
///
/// Consecutive stops in the sequence are the only ride adjacencies, and
/// they can be ridden in both directions.
///
/// # Invariants
///
/// - Name is non-empty
/// - At least one stop
#[derive(Debug, Clone)]
pub struct Route {
    id: RouteId,
    name: String,
    stops: Vec<StopId>,
}

impl Route {
    /// Construct a route from stops that are already in ride order.
    pub fn new(
        id: RouteId,
        name: impl Into<String>,
        stops: Vec<StopId>,
    ) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::EmptyName);
        }
        if stops.is_empty() {
            return Err(DomainError::EmptyRoute(name));
        }
        Ok(Self { id, name, stops })
    }

    pub fn id(&self) -> RouteId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stops in ride order.
    pub fn stops(&self) -> &[StopId] {
        &self.stops
    }

    /// Position of the first occurrence of `stop` in the sequence.
    pub fn position(&self, stop: StopId) -> Option<usize> {
        self.stops.iter().position(|&s| s == stop)
    }

    /// Sequence neighbours of `stop`: for each visit, the previous stop
    /// then the next.
    ///
    /// A route that passes a stop more than once (a loop returning to its
    /// terminus, say) yields the neighbours of every visit, each stop at
    /// most once, in order of first appearance. Returns an empty iterator
    /// if the stop is not on this route.
    pub fn neighbours(&self, stop: StopId) -> impl Iterator<Item = StopId> + '_ {
        let mut found: Vec<StopId> = Vec::new();
        for (i, _) in self.stops.iter().enumerate().filter(|&(_, &s)| s == stop) {
            let prev = i.checked_sub(1).map(|j| self.stops[j]);
            let next = self.stops.get(i + 1).copied();
            for n in prev.into_iter().chain(next) {
                if !found.contains(&n) {
                    found.push(n);
                }
            }
        }
        found.into_iter()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
