//! Domain types for the bus route finder.
//!
//! This module contains the core domain model types that represent
//! validated network data. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod error;
mod path;
mod route;
mod stop;

pub use error::DomainError;
pub use path::{Leg, PathReport, PathStep};
pub use route::{Route, RouteId};
pub use stop::{EARTH_RADIUS_KM, GeoPoint, Stop, StopId};
