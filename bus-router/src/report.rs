//! Plain-text itinerary rendering.

use askama::Template;

use crate::domain::PathReport;
use crate::graph::TransitGraph;

/// Itinerary printout, one block per leg.
#[derive(Template)]
#[template(path = "report.txt")]
pub struct ReportTemplate {
    pub transfers: usize,
    pub legs: Vec<LegView>,
    pub total_distance_km: f64,
}

/// Leg view model for templates.
#[derive(Debug, Clone)]
pub struct LegView {
    pub route: String,
    pub stops: Vec<String>,
}

impl ReportTemplate {
    /// Resolve ids in `report` to display names.
    pub fn new(graph: &TransitGraph, report: &PathReport) -> Self {
        let legs = report
            .legs()
            .iter()
            .map(|leg| LegView {
                route: graph.route_name(leg.route()).to_string(),
                stops: leg
                    .stops()
                    .iter()
                    .map(|&s| graph.stop_name(s).to_string())
                    .collect(),
            })
            .collect();

        Self {
            transfers: report.transfers(),
            legs,
            total_distance_km: report.total_distance_km(),
        }
    }
}

/// Render `report` as the text printout used by the terminal and by
/// `text/plain` API responses.
pub fn render_report(graph: &TransitGraph, report: &PathReport) -> Result<String, askama::Error> {
    ReportTemplate::new(graph, report).render()
}
