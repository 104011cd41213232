//! Per-state occurrence counts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Occurrences of each state code, e.g. `ERR`, `WRN`, `INF`.
///
/// Counts only ever grow. Merging two counters sums them, so the order in
/// which files are folded never changes the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateCounter {
    counts: BTreeMap<String, u64>,
}

impl StateCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, state: &str) {
        self.add(state, 1);
    }

    pub fn add(&mut self, state: &str, count: u64) {
        if let Some(existing) = self.counts.get_mut(state) {
            *existing += count;
        } else {
            self.counts.insert(state.to_string(), count);
        }
    }

    /// Count for `state`, zero if never seen.
    pub fn get(&self, state: &str) -> u64 {
        self.counts.get(state).copied().unwrap_or(0)
    }

    /// Sum across all states.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct states seen.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn merge(&mut self, other: &StateCounter) {
        for (state, count) in &other.counts {
            self.add(state, *count);
        }
    }

    /// States in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(s, c)| (s.as_str(), *c))
    }

    /// States ordered by count descending, ties broken alphabetically.
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }

    /// The most frequent state, if any.
    pub fn most_common(&self) -> Option<(&str, u64)> {
        self.ranked().into_iter().next()
    }

    /// Share of `state` in the total as a percentage (0.0 when empty).
    pub fn percentage(&self, state: &str) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.get(state) as f64 / total as f64 * 100.0
    }
}
