//! Path report types.
//!
//! A `PathReport` is the engine's answer to a routing query: the ride
//! split into legs, one per uninterrupted ride on a single route.

use super::{RouteId, StopId};

/// One step of a reconstructed path: a stop reached while riding a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStep {
    pub stop: StopId,
    pub route: RouteId,
}

impl PathStep {
    pub fn new(stop: StopId, route: RouteId) -> Self {
        Self { stop, route }
    }
}

/// A maximal uninterrupted ride on a single route.
///
/// # Invariants
///
/// - At least one stop
/// - `distance_km` is the sum of great-circle distances between
///   consecutive stops
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    route: RouteId,
    stops: Vec<StopId>,
    distance_km: f64,
}

impl Leg {
    /// The route ridden on this leg.
    pub fn route(&self) -> RouteId {
        self.route
    }

    /// Stops visited on this leg, in ride order.
    pub fn stops(&self) -> &[StopId] {
        &self.stops
    }

    /// Boarding stop.
    pub fn board_stop(&self) -> StopId {
        // Safe: legs are never empty
        self.stops[0]
    }

    /// Alighting stop.
    pub fn alight_stop(&self) -> StopId {
        self.stops[self.stops.len() - 1]
    }

    /// Physical distance ridden on this leg, in kilometres.
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }
}

/// A complete itinerary from start to goal.
///
/// # Invariants
///
/// - At least one leg
/// - Consecutive legs meet at the same stop (a transfer)
/// - `total_distance_km` is the sum of leg distances
#[derive(Debug, Clone, PartialEq)]
pub struct PathReport {
    legs: Vec<Leg>,
    total_distance_km: f64,
    total_cost: f64,
    transfers: usize,
}

impl PathReport {
    /// Assemble a report from a start-to-goal sequence of path steps.
    ///
    /// Steps are partitioned into maximal runs sharing a route; each run
    /// becomes a leg. `distance` gives the great-circle distance between
    /// two stops. `transfers` and `total_cost` come from the search's
    /// terminal entry.
    ///
    /// Returns `None` if `steps` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use bus_router::domain::{PathReport, PathStep, RouteId, StopId};
    ///
    /// let r1 = RouteId(0);
    /// let r2 = RouteId(1);
    /// let steps = [
    ///     PathStep::new(StopId(0), r1),
    ///     PathStep::new(StopId(1), r1),
    ///     PathStep::new(StopId(1), r2),
    ///     PathStep::new(StopId(2), r2),
    /// ];
    ///
    /// // Every hop is one kilometre in this toy metric.
    /// let report = PathReport::assemble(&steps, 1, 32.0, |_, _| 1.0).unwrap();
    ///
    /// assert_eq!(report.legs().len(), 2);
    /// assert_eq!(report.legs()[1].stops(), &[StopId(1), StopId(2)]);
    /// assert_eq!(report.total_distance_km(), 2.0);
    /// assert_eq!(report.transfers(), 1);
    /// ```
    pub fn assemble<F>(
        steps: &[PathStep],
        transfers: usize,
        total_cost: f64,
        distance: F,
    ) -> Option<Self>
    where
        F: Fn(StopId, StopId) -> f64,
    {
        if steps.is_empty() {
            return None;
        }

        let legs: Vec<Leg> = steps
            .chunk_by(|a, b| a.route == b.route)
            .map(|run| {
                let stops: Vec<StopId> = run.iter().map(|s| s.stop).collect();
                let distance_km = stops.windows(2).map(|w| distance(w[0], w[1])).sum();
                Leg {
                    route: run[0].route,
                    stops,
                    distance_km,
                }
            })
            .collect();

        let total_distance_km = legs.iter().map(Leg::distance_km).sum();

        Some(Self {
            legs,
            total_distance_km,
            total_cost,
            transfers,
        })
    }

    /// Legs in ride order.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Number of legs.
    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    /// Physical distance travelled, excluding transfer penalties.
    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    /// Search cost of the path: distance plus one penalty per transfer.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Number of route changes.
    pub fn transfers(&self) -> usize {
        self.transfers
    }

    /// The first stop of the itinerary.
    pub fn origin(&self) -> StopId {
        self.legs[0].board_stop()
    }

    /// The last stop of the itinerary.
    pub fn destination(&self) -> StopId {
        self.legs[self.legs.len() - 1].alight_stop()
    }
}
