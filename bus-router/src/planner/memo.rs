//! Best-known cost per search state.

use std::collections::HashMap;

use crate::domain::{RouteId, StopId};

/// Memo key: the route being ridden and the stop reached on it.
///
/// A pair type rather than a joined string, so route and stop names
/// containing separator characters cannot collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateKey {
    pub route: RouteId,
    pub stop: StopId,
}

impl StateKey {
    pub fn new(route: RouteId, stop: StopId) -> Self {
        Self { route, stop }
    }
}

/// Smallest cost at which each state has been generated in the current
/// query. Used only to prune re-generation of dominated paths.
#[derive(Debug, Default)]
pub struct CostMemo {
    best: HashMap<StateKey, f64>,
}

impl CostMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Best cost recorded for `key`, or infinity if never seen.
    pub fn get(&self, key: &StateKey) -> f64 {
        self.best.get(key).copied().unwrap_or(f64::INFINITY)
    }

    /// Record `cost` for `key`, overwriting any previous value.
    pub fn put(&mut self, key: StateKey, cost: f64) {
        self.best.insert(key, cost);
    }

    /// Forget every entry.
    pub fn clear(&mut self) {
        self.best.clear();
    }

    pub fn len(&self) -> usize {
        self.best.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(route: usize, stop: usize) -> StateKey {
        StateKey::new(RouteId(route), StopId(stop))
    }

    #[test]
    fn unseen_is_infinite() {
        let memo = CostMemo::new();
        assert!(memo.is_empty());
        assert_eq!(memo.get(&key(0, 0)), f64::INFINITY);
    }

    #[test]
    fn put_overwrites_unconditionally() {
        let mut memo = CostMemo::new();
        memo.put(key(1, 2), 5.0);
        memo.put(key(1, 2), 9.0);
        assert_eq!(memo.get(&key(1, 2)), 9.0);
        assert_eq!(memo.len(), 1);
    }

    #[test]
    fn route_and_stop_are_distinct_components() {
        let mut memo = CostMemo::new();
        memo.put(key(1, 2), 1.0);
        assert_eq!(memo.get(&key(2, 1)), f64::INFINITY);
    }

    #[test]
    fn clear_discards_everything() {
        let mut memo = CostMemo::new();
        memo.put(key(0, 0), 0.0);
        memo.put(key(0, 1), 3.0);
        memo.clear();
        assert!(memo.is_empty());
        assert_eq!(memo.get(&key(0, 1)), f64::INFINITY);
    }
}
