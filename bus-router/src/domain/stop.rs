//! Stop types and great-circle geometry.

use std::fmt;

use super::{DomainError, RouteId};

/// Mean Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Index of a stop within a [`TransitGraph`](crate::graph::TransitGraph).
///
/// Stop identifiers are dense indices assigned in load order. They are
/// only meaningful for the graph that issued them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId(pub usize);

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A latitude/longitude pair in degrees.
///
/// Any `GeoPoint` holds finite values with latitude in `[-90, 90]` and
/// longitude in `[-180, 180]`.
///
/// # Examples
///
/// ```
/// use bus_router::domain::GeoPoint;
///
/// let a = GeoPoint::new(0.0, 0.0).unwrap();
/// let b = GeoPoint::new(0.0, 1.0).unwrap();
/// let d = a.haversine_km(&b);
/// assert!((d - 111.19).abs() < 0.01);
///
/// assert!(GeoPoint::new(95.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
}

impl GeoPoint {
    /// Construct a point, rejecting non-finite or out-of-range values.
    pub fn new(lat: f64, lon: f64) -> Result<Self, DomainError> {
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);
        if !valid {
            return Err(DomainError::InvalidCoordinate { lat, lon });
        }
        Ok(Self { lat, lon })
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Great-circle distance to `other` in kilometres.
    ///
    /// The result is non-negative and symmetric.
    pub fn haversine_km(&self, other: &GeoPoint) -> f64 {
        let dlat = (other.lat - self.lat).to_radians();
        let dlon = (other.lon - self.lon).to_radians();
        let a = (dlat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos()
                * other.lat.to_radians().cos()
                * (dlon / 2.0).sin().powi(2);
        // Rounding can push `a` a hair outside [0, 1] for antipodal points.
        let a = a.clamp(0.0, 1.0);
        2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
    }
}

/// A bus stop.
///
/// The set of serving routes is ordered by registration and holds no
/// duplicates.
#[derive(Debug, Clone)]
pub struct Stop {
    id: StopId,
    name: String,
    location: GeoPoint,
    routes: Vec<RouteId>,
}

impl Stop {
    /// Create a stop that is not yet served by any route.
    pub fn new(
        id: StopId,
        name: impl Into<String>,
        location: GeoPoint,
    ) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::EmptyName);
        }
        Ok(Self {
            id,
            name,
            location,
            routes: Vec::new(),
        })
    }

    pub fn id(&self) -> StopId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &GeoPoint {
        &self.location
    }

    /// Routes serving this stop, in registration order.
    pub fn routes(&self) -> &[RouteId] {
        &self.routes
    }

    /// Returns true if `route` serves this stop.
    pub fn is_served_by(&self, route: RouteId) -> bool {
        self.routes.contains(&route)
    }

    /// Register a serving route. Returns false if it was already present.
    pub fn add_route(&mut self, route: RouteId) -> bool {
        if self.is_served_by(route) {
            return false;
        }
        self.routes.push(route);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn rejects_invalid_coordinates() {
        assert!(GeoPoint::new(90.5, 0.0).is_err());
        assert!(GeoPoint::new(-90.5, 0.0).is_err());
        assert!(GeoPoint::new(0.0, 180.5).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::INFINITY).is_err());
        assert!(GeoPoint::new(90.0, -180.0).is_ok());
    }

    #[test]
    fn zero_distance_to_self() {
        let p = point(19.07, 72.87);
        assert_eq!(p.haversine_km(&p), 0.0);
    }

    #[test]
    fn one_degree_of_longitude_at_equator() {
        let d = point(0.0, 0.0).haversine_km(&point(0.0, 1.0));
        // 2 * pi * 6371 / 360
        assert!((d - 111.194_926_6).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn known_city_distance() {
        // Mumbai CST to Pune station, roughly 120 km apart.
        let mumbai = point(18.9398, 72.8355);
        let pune = point(18.5286, 73.8743);
        let d = mumbai.haversine_km(&pune);
        assert!((115.0..125.0).contains(&d), "got {d}");
    }

    #[test]
    fn antipodal_points() {
        let d = point(0.0, 0.0).haversine_km(&point(0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn stop_trims_name_and_rejects_empty() {
        let stop = Stop::new(StopId(0), "  Dadar TT  ", point(19.0, 72.8)).unwrap();
        assert_eq!(stop.name(), "Dadar TT");

        assert_eq!(
            Stop::new(StopId(1), "   ", point(0.0, 0.0)).unwrap_err(),
            DomainError::EmptyName
        );
    }

    #[test]
    fn add_route_deduplicates() {
        let mut stop = Stop::new(StopId(0), "Worli", point(19.0, 72.8)).unwrap();
        assert!(stop.add_route(RouteId(3)));
        assert!(stop.add_route(RouteId(1)));
        assert!(!stop.add_route(RouteId(3)));
        assert_eq!(stop.routes(), &[RouteId(3), RouteId(1)]);
        assert!(stop.is_served_by(RouteId(1)));
        assert!(!stop.is_served_by(RouteId(2)));
    }
}
