//! Process configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::planner::SearchConfig;

/// Default listen address for the HTTP server.
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("invalid value for {var}: {value:?} ({message})")]
    Invalid {
        var: &'static str,
        value: String,
        message: String,
    },
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Stops CSV (`BUS_STOPS_FILE`)
    pub stops_file: PathBuf,
    /// Routes CSV (`BUS_ROUTES_FILE`)
    pub routes_file: PathBuf,
    /// HTTP listen address (`BUS_ROUTER_ADDR`)
    pub addr: SocketAddr,
    /// Search tuning (`BUS_TRANSFER_PENALTY`, `BUS_MAX_LOG_ENTRIES`,
    /// `BUS_SEARCH_TIMEOUT_MS`)
    pub search: SearchConfig,
}

fn parse<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        message: e.to_string(),
        value,
    })
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value if set. Unset variables take their defaults.
    ///
    /// `BUS_MAX_LOG_ENTRIES=0` removes the search log bound.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SearchConfig::default();

        let stops_file = lookup("BUS_STOPS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data/stops.csv"));
        let routes_file = lookup("BUS_ROUTES_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data/routes.csv"));

        let addr = parse(
            "BUS_ROUTER_ADDR",
            lookup("BUS_ROUTER_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string()),
        )?;

        let transfer_penalty = match lookup("BUS_TRANSFER_PENALTY") {
            Some(v) => parse::<f64>("BUS_TRANSFER_PENALTY", v)?,
            None => defaults.transfer_penalty,
        };
        if !transfer_penalty.is_finite() || transfer_penalty < 0.0 {
            return Err(ConfigError::Invalid {
                var: "BUS_TRANSFER_PENALTY",
                value: transfer_penalty.to_string(),
                message: "must be a non-negative number".to_string(),
            });
        }

        let max_log_entries = match lookup("BUS_MAX_LOG_ENTRIES") {
            Some(v) => match parse::<usize>("BUS_MAX_LOG_ENTRIES", v)? {
                0 => None,
                n => Some(n),
            },
            None => defaults.max_log_entries,
        };

        let search_timeout_ms = match lookup("BUS_SEARCH_TIMEOUT_MS") {
            Some(v) => parse("BUS_SEARCH_TIMEOUT_MS", v)?,
            None => defaults.search_timeout_ms,
        };

        Ok(Self {
            stops_file,
            routes_file,
            addr,
            search: SearchConfig::new(transfer_penalty, max_log_entries, search_timeout_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config(&[]).unwrap();
        assert_eq!(config.stops_file, PathBuf::from("data/stops.csv"));
        assert_eq!(config.routes_file, PathBuf::from("data/routes.csv"));
        assert_eq!(config.addr, DEFAULT_ADDR.parse().unwrap());
        assert_eq!(config.search, SearchConfig::default());
    }

    #[test]
    fn overrides_from_environment() {
        let config = config(&[
            ("BUS_STOPS_FILE", "/srv/stops.csv"),
            ("BUS_ROUTER_ADDR", "0.0.0.0:8080"),
            ("BUS_TRANSFER_PENALTY", " 12.5 "),
            ("BUS_MAX_LOG_ENTRIES", "0"),
            ("BUS_SEARCH_TIMEOUT_MS", "250"),
        ])
        .unwrap();

        assert_eq!(config.stops_file, PathBuf::from("/srv/stops.csv"));
        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.search.transfer_penalty, 12.5);
        assert_eq!(config.search.max_log_entries, None);
        assert_eq!(config.search.search_timeout_ms, 250);
    }

    #[test]
    fn rejects_bad_values() {
        let err = config(&[("BUS_MAX_LOG_ENTRIES", "lots")]).unwrap_err();
        assert!(err.to_string().contains("BUS_MAX_LOG_ENTRIES"));

        let err = config(&[("BUS_TRANSFER_PENALTY", "-1")]).unwrap_err();
        assert!(err.to_string().contains("non-negative"));

        assert!(config(&[("BUS_ROUTER_ADDR", "localhost")]).is_err());
    }
}
