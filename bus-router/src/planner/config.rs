//! Search configuration for the route finder.

use std::time::Duration;

/// Cost added for each change of route, in distance units (km).
pub const DEFAULT_TRANSFER_PENALTY: f64 = 30.0;

/// Configuration parameters for route search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Cost of switching routes at a stop, in the same units as distance.
    pub transfer_penalty: f64,

    /// Maximum number of search log entries per query.
    /// `None` lets the log grow without bound.
    pub max_log_entries: Option<usize>,

    /// Wall-clock budget for one query when run by the web layer (milliseconds).
    pub search_timeout_ms: u64,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        transfer_penalty: f64,
        max_log_entries: Option<usize>,
        search_timeout_ms: u64,
    ) -> Self {
        Self {
            transfer_penalty,
            max_log_entries,
            search_timeout_ms,
        }
    }

    /// Returns the search timeout as a Duration.
    pub fn search_timeout(&self) -> Duration {
        Duration::from_millis(self.search_timeout_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            transfer_penalty: DEFAULT_TRANSFER_PENALTY,
            max_log_entries: Some(200_000),
            search_timeout_ms: 5_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SearchConfig::default();

        assert_eq!(config.transfer_penalty, 30.0);
        assert_eq!(config.max_log_entries, Some(200_000));
        assert_eq!(config.search_timeout_ms, 5_000);
    }

    #[test]
    fn duration_methods() {
        let config = SearchConfig::default();

        assert_eq!(config.search_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn custom_config() {
        let config = SearchConfig::new(12.5, None, 250);

        assert_eq!(config.transfer_penalty, 12.5);
        assert_eq!(config.max_log_entries, None);
        assert_eq!(config.search_timeout(), Duration::from_millis(250));
    }
}
