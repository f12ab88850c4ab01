//! Stop name lookup.
//!
//! Users type stop names loosely: wrong case, partial names. Resolution
//! tries a case-insensitive exact match first and falls back to the first
//! stop whose name contains the query.

use crate::domain::{Stop, StopId};
use crate::graph::TransitGraph;

/// A stop returned by [`StopNames::search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopMatch {
    pub id: StopId,
    pub name: String,
}

/// How well a stop name matched a query. Lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MatchRank {
    Exact,
    Prefix,
    Contains,
}

fn rank(folded_name: &str, folded_query: &str) -> Option<MatchRank> {
    if folded_name == folded_query {
        Some(MatchRank::Exact)
    } else if folded_name.starts_with(folded_query) {
        Some(MatchRank::Prefix)
    } else if folded_name.contains(folded_query) {
        Some(MatchRank::Contains)
    } else {
        None
    }
}

fn fold(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Case-folded stop name index over a graph.
#[derive(Debug, Clone, Default)]
pub struct StopNames {
    /// (id, display name, folded name) in load order.
    entries: Vec<(StopId, String, String)>,
}

impl StopNames {
    /// Index every stop of `graph`.
    pub fn new(graph: &TransitGraph) -> Self {
        Self::from_stops(graph.stops())
    }

    /// Index a slice of stops, e.g. while a graph is still being built.
    pub fn from_stops(stops: &[Stop]) -> Self {
        let entries = stops
            .iter()
            .map(|s| (s.id(), s.name().to_string(), fold(s.name())))
            .collect();
        Self { entries }
    }

    /// Resolve a typed name to a single stop.
    ///
    /// Returns the first case-insensitive exact match, or failing that the
    /// first stop (in load order) whose name contains the query. Empty
    /// queries resolve to nothing.
    pub fn resolve(&self, query: &str) -> Option<StopId> {
        let query = fold(query);
        if query.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|(_, _, folded)| *folded == query)
            .or_else(|| self.entries.iter().find(|(_, _, folded)| folded.contains(&query)))
            .map(|(id, _, _)| *id)
    }

    /// Stops matching `query`, best first: exact, then prefix, then
    /// substring matches, each group alphabetical.
    pub fn search(&self, query: &str, limit: usize) -> Vec<StopMatch> {
        let query = fold(query);
        if query.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<(MatchRank, &str, StopId)> = self
            .entries
            .iter()
            .filter_map(|(id, name, folded)| rank(folded, &query).map(|r| (r, name.as_str(), *id)))
            .collect();
        hits.sort();
        hits.truncate(limit);

        hits.into_iter()
            .map(|(_, name, id)| StopMatch {
                id,
                name: name.to_string(),
            })
            .collect()
    }

    /// Get the number of stops in the lookup.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the lookup is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    fn graph() -> TransitGraph {
        let mut b = GraphBuilder::new();
        for (i, name) in ["Dadar TT", "Dadar Station (W)", "Worli Depot", "Sion", "Dadar"]
            .iter()
            .enumerate()
        {
            b.add_stop(name, 19.0, 72.8 + i as f64 * 0.01).unwrap();
        }
        b.build()
    }

    #[test]
    fn exact_match_beats_earlier_substring() {
        let g = graph();
        let names = StopNames::new(&g);
        // "Dadar TT" comes first and contains "dadar", but "Dadar" is exact.
        assert_eq!(names.resolve("DADAR"), Some(StopId(4)));
        assert_eq!(StopNames::from_stops(g.stops()).resolve("dadar"), Some(StopId(4)));
    }

    #[test]
    fn substring_falls_back_to_load_order() {
        let g = graph();
        let names = StopNames::new(&g);
        assert_eq!(names.resolve("station"), Some(StopId(1)));
        assert_eq!(names.resolve("  depot "), Some(StopId(2)));
        assert_eq!(names.resolve("dar"), Some(StopId(0)));
    }

    #[test]
    fn unknown_and_empty_queries() {
        let g = graph();
        let names = StopNames::new(&g);
        assert_eq!(names.resolve("Colaba"), None);
        assert_eq!(names.resolve("   "), None);
        assert_eq!(names.resolve(""), None);
    }

    #[test]
    fn search_orders_by_match_quality() {
        let names = StopNames::new(&graph());
        let hits: Vec<String> = names.search("dadar", 10).into_iter().map(|m| m.name).collect();
        assert_eq!(hits, vec!["Dadar", "Dadar Station (W)", "Dadar TT"]);
    }

    #[test]
    fn search_respects_limit() {
        let names = StopNames::new(&graph());
        assert_eq!(names.search("o", 2).len(), 2);
        assert!(names.search("", 5).is_empty());
        assert_eq!(names.len(), 5);
        assert!(!names.is_empty());
    }
}
