//! Application state for the web layer.

use std::sync::Arc;

use crate::graph::TransitGraph;
use crate::planner::SearchConfig;
use crate::stops::StopNames;

/// Shared application state.
///
/// The network is loaded once at startup and never mutated, so handlers
/// share it without locking.
#[derive(Clone)]
pub struct AppState {
    /// Stops and routes
    pub graph: Arc<TransitGraph>,

    /// Name lookup over the graph's stops
    pub names: Arc<StopNames>,

    /// Route search configuration
    pub config: Arc<SearchConfig>,
}

impl AppState {
    /// Create a new app state, indexing stop names from `graph`.
    pub fn new(graph: TransitGraph, config: SearchConfig) -> Self {
        let names = StopNames::new(&graph);
        Self {
            graph: Arc::new(graph),
            names: Arc::new(names),
            config: Arc::new(config),
        }
    }
}
