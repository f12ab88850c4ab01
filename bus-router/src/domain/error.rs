//! Domain error types.
//!
//! These errors represent validation failures while assembling the
//! network model. They are distinct from loader IO errors and from
//! search outcomes.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Stop or route name is empty after trimming
    #[error("name must not be empty")]
    EmptyName,

    /// Coordinate is not a finite value within the valid range
    #[error("invalid coordinate ({lat}, {lon})")]
    InvalidCoordinate { lat: f64, lon: f64 },

    /// A stop with the same name was already registered
    #[error("duplicate stop name: {0}")]
    DuplicateStop(String),

    /// A route with the same name was already registered
    #[error("duplicate route name: {0}")]
    DuplicateRoute(String),

    /// A route references a stop that does not exist
    #[error("route {route} references unknown stop index {stop}")]
    UnknownStop { route: String, stop: usize },

    /// Route has no stops
    #[error("route {0} must have at least one stop")]
    EmptyRoute(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(DomainError::EmptyName.to_string(), "name must not be empty");

        let err = DomainError::InvalidCoordinate {
            lat: 91.0,
            lon: 0.0,
        };
        assert_eq!(err.to_string(), "invalid coordinate (91, 0)");

        let err = DomainError::DuplicateStop("Dadar".into());
        assert_eq!(err.to_string(), "duplicate stop name: Dadar");

        let err = DomainError::UnknownStop {
            route: "A-1".into(),
            stop: 7,
        };
        assert_eq!(err.to_string(), "route A-1 references unknown stop index 7");

        let err = DomainError::EmptyRoute("44".into());
        assert_eq!(err.to_string(), "route 44 must have at least one stop");
    }
}
