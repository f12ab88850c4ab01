//! Route planner using best-first (A*) search.
//!
//! This module implements the core routing algorithm that answers:
//! "What is the cheapest way to ride from this stop to that one?"
//!
//! Cost is physical distance plus a fixed penalty per change of route.
//! The search works on (stop, route) states rather than stops alone,
//! because which route is being ridden decides both the legal moves and
//! whether the next move is a transfer.

mod cancel;
mod config;
mod frontier;
mod log;
mod memo;
mod search;


pub use cancel::CancelFlag;
pub use config::{DEFAULT_TRANSFER_PENALTY, SearchConfig};
pub use frontier::{Frontier, FrontierEntry};
pub use log::{CapacityExceeded, LogEntry, LogIndex, SearchLog};
pub use memo::{CostMemo, StateKey};
pub use search::{Planner, RouteRequest, SearchError, SearchResult, SearchStats};
