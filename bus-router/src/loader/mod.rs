//! CSV ingestion of stops and routes.
//!
//! Two flat files describe the network:
//!
//! - a stops file: a header row, then `name,lat,lon` per stop (names may
//!   be quoted);
//! - a routes file: a header row, then `route,seq,stop` per stop visit.
//!   Rows for a route need not be contiguous or in sequence order. Any
//!   fields after `seq` are rejoined with commas, so unquoted stop names
//!   containing commas survive.
//!
//! Route rows name stops loosely; they are resolved with the same rules
//! users get (see [`StopNames::resolve`]). Rows that resolve to no stop
//! are skipped with a warning rather than failing the load.

mod error;

pub use error::LoadError;

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use tracing::{info, warn};

use crate::domain::{DomainError, StopId};
use crate::graph::{GraphBuilder, TransitGraph};
use crate::stops::StopNames;

/// One row of the stops file.
#[derive(Debug, Deserialize)]
struct StopRow {
    name: String,
    lat: f64,
    lon: f64,
}

/// Rows of the routes file collected under one route name.
#[derive(Debug, Default)]
struct RouteRows {
    name: String,
    /// (line, sequence index, stop name)
    visits: Vec<(u64, i64, String)>,
}

fn reader<R: Read>(input: R, trim: Trim) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(trim)
        .from_reader(input)
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

/// Read stops into `builder`. Returns the number of stops added.
///
/// Duplicate names keep the first occurrence and log a warning. Rows whose
/// coordinates do not parse or lie outside the valid range fail the load.
pub fn load_stops<R: Read>(input: R, builder: &mut GraphBuilder) -> Result<usize, LoadError> {
    let mut added = 0;

    for record in reader(input, Trim::All).records() {
        let record = record?;
        let line = line_of(&record);
        let row: StopRow = record.deserialize(None).map_err(|e| LoadError::Parse {
            line,
            message: e.to_string(),
        })?;

        match builder.add_stop(&row.name, row.lat, row.lon) {
            Ok(_) => added += 1,
            Err(DomainError::DuplicateStop(name)) => {
                warn!(line, stop = %name, "duplicate stop name, keeping first");
            }
            Err(source) => return Err(LoadError::Domain { line, source }),
        }
    }

    Ok(added)
}

/// Read routes into `builder`, whose stops must already be loaded.
/// Returns the number of routes added.
pub fn load_routes<R: Read>(input: R, builder: &mut GraphBuilder) -> Result<usize, LoadError> {
    let mut groups: Vec<RouteRows> = Vec::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();

    // Untrimmed so that spaces after a split comma survive the rejoin.
    for record in reader(input, Trim::None).records() {
        let record = record?;
        let line = line_of(&record);

        let route = record.get(0).unwrap_or_default().trim();
        if route.is_empty() {
            return Err(LoadError::Parse {
                line,
                message: "missing route name".to_string(),
            });
        }
        let seq: i64 = record
            .get(1)
            .unwrap_or_default()
            .trim()
            .parse()
            .map_err(|e| LoadError::Parse {
                line,
                message: format!("invalid sequence number: {e}"),
            })?;
        let stop = record.iter().skip(2).collect::<Vec<_>>().join(",").trim().to_string();

        let idx = *by_name.entry(route.to_string()).or_insert_with(|| {
            groups.push(RouteRows {
                name: route.to_string(),
                visits: Vec::new(),
            });
            groups.len() - 1
        });
        groups[idx].visits.push((line, seq, stop));
    }

    let names = StopNames::from_stops(builder.stops());
    let mut added = 0;

    for group in groups {
        let mut sequence: Vec<(i64, StopId)> = Vec::with_capacity(group.visits.len());
        for (line, seq, stop) in &group.visits {
            match names.resolve(stop) {
                Some(id) => sequence.push((*seq, id)),
                None => warn!(line, route = %group.name, stop = %stop, "unknown stop, skipping"),
            }
        }

        if sequence.is_empty() {
            warn!(route = %group.name, "no resolvable stops, skipping route");
            continue;
        }

        let first_line = group.visits.first().map(|v| v.0).unwrap_or(0);
        builder
            .add_route(&group.name, sequence)
            .map_err(|source| LoadError::Domain {
                line: first_line,
                source,
            })?;
        added += 1;
    }

    Ok(added)
}

/// Load a complete graph from a stops file and a routes file.
pub fn load_graph(stops_path: &Path, routes_path: &Path) -> Result<TransitGraph, LoadError> {
    let open = |path: &Path| {
        File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
    };

    let mut builder = GraphBuilder::new();

    let stops = load_stops(open(stops_path)?, &mut builder)?;
    info!(stops, path = %stops_path.display(), "loaded stops");

    let routes = load_routes(open(routes_path)?, &mut builder)?;
    info!(routes, path = %routes_path.display(), "loaded routes");

    Ok(builder.build())
}
