//! Append-only search log.
//!
//! Every generated state gets one entry. Entries are immutable once
//! written and refer to the entry they were generated from by index, so
//! the log is a tree rooted at the seed states and any path can be
//! recovered by walking parent links.

use crate::domain::{PathStep, RouteId, StopId};

/// Index of an entry in a [`SearchLog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LogIndex(pub usize);

/// A bounded container refused more work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("search capacity of {limit} entries exceeded")]
pub struct CapacityExceeded {
    pub limit: usize,
}

/// One generated search state.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub stop: StopId,
    pub route: RouteId,
    /// Cumulative cost from the start (distance plus transfer penalties).
    pub cost: f64,
    pub transfers: usize,
    /// `None` only for seed states.
    pub parent: Option<LogIndex>,
}

/// Arena of log entries for one query.
#[derive(Debug, Default)]
pub struct SearchLog {
    entries: Vec<LogEntry>,
    limit: Option<usize>,
}

impl SearchLog {
    /// Create a log holding at most `limit` entries (`None` = unbounded).
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    /// Append an entry and return its index.
    pub fn push(&mut self, entry: LogEntry) -> Result<LogIndex, CapacityExceeded> {
        if let Some(limit) = self.limit {
            if self.entries.len() >= limit {
                return Err(CapacityExceeded { limit });
            }
        }
        self.entries.push(entry);
        Ok(LogIndex(self.entries.len() - 1))
    }

    /// Entry at `idx`, if it was pushed.
    pub fn get(&self, idx: LogIndex) -> Option<&LogEntry> {
        self.entries.get(idx.0)
    }

    /// Number of entries generated so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been generated yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Steps from the seed ancestor of `terminal` down to `terminal`.
    pub fn path_to(&self, terminal: LogIndex) -> Vec<PathStep> {
        let mut steps = Vec::new();
        let mut cursor = Some(terminal);
        while let Some(idx) = cursor {
            let Some(entry) = self.get(idx) else {
                break;
            };
            steps.push(PathStep::new(entry.stop, entry.route));
            cursor = entry.parent;
        }
        steps.reverse();
        steps
    }
}
