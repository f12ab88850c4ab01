//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Leg, PathReport};
use crate::graph::TransitGraph;
use crate::planner::{SearchResult, SearchStats};
use crate::stops::StopMatch;

/// Query for stop name search.
#[derive(Debug, Deserialize)]
pub struct StopSearchRequest {
    /// Partial stop name
    pub q: String,

    /// Maximum number of results (default 10, capped at 50)
    pub limit: Option<usize>,
}

/// A stop in search results.
#[derive(Debug, Serialize)]
pub struct StopSearchResult {
    /// Dense stop index
    pub id: usize,

    /// Display name
    pub name: String,
}

impl From<StopMatch> for StopSearchResult {
    fn from(m: StopMatch) -> Self {
        Self {
            id: m.id.0,
            name: m.name,
        }
    }
}

/// Response for stop name search.
#[derive(Debug, Serialize)]
pub struct StopSearchResponse {
    /// Matching stops, best first
    pub stops: Vec<StopSearchResult>,
}

/// Request to plan a route between two stops.
///
/// Names are resolved the same way as at the terminal prompt, so partial
/// and differently-cased names are accepted.
#[derive(Debug, Deserialize)]
pub struct PlanRouteRequest {
    /// Starting stop name
    pub start: String,

    /// Destination stop name
    pub goal: String,
}

/// One ride on a single route.
#[derive(Debug, Serialize)]
pub struct LegResult {
    /// Route name
    pub route: String,

    /// Stops visited, boarding stop first
    pub stops: Vec<String>,

    /// Great-circle distance covered on this leg
    pub distance_km: f64,
}

impl LegResult {
    /// Create from a domain Leg.
    pub fn from_leg(graph: &TransitGraph, leg: &Leg) -> Self {
        Self {
            route: graph.route_name(leg.route()).to_string(),
            stops: leg
                .stops()
                .iter()
                .map(|&s| graph.stop_name(s).to_string())
                .collect(),
            distance_km: leg.distance_km(),
        }
    }
}

/// Search effort counters.
#[derive(Debug, Serialize)]
pub struct StatsResult {
    pub states_generated: usize,
    pub states_expanded: usize,
    pub data_inconsistencies: usize,
}

impl From<SearchStats> for StatsResult {
    fn from(s: SearchStats) -> Self {
        Self {
            states_generated: s.states_generated,
            states_expanded: s.states_expanded,
            data_inconsistencies: s.data_inconsistencies,
        }
    }
}

/// Response for route planning.
#[derive(Debug, Serialize)]
pub struct PlanRouteResponse {
    /// Legs in ride order
    pub legs: Vec<LegResult>,

    /// Physical distance travelled
    pub total_distance_km: f64,

    /// Distance plus transfer penalties
    pub total_cost: f64,

    /// Number of route changes
    pub transfers: usize,

    /// Search effort
    pub stats: StatsResult,
}

impl PlanRouteResponse {
    /// Create from a search result.
    pub fn from_result(graph: &TransitGraph, result: &SearchResult) -> Self {
        let report: &PathReport = &result.report;
        Self {
            legs: report
                .legs()
                .iter()
                .map(|leg| LegResult::from_leg(graph, leg))
                .collect(),
            total_distance_km: report.total_distance_km(),
            total_cost: report.total_cost(),
            transfers: report.transfers(),
            stats: result.stats.into(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
