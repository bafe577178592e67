//! Counters collected while a pass runs.
//!
//! Each explorer owns its counters; a fan-out folds every branch's counters back into the parent
//! once the branches have joined, so no counter is ever shared between threads.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Recursive calls that were not cancelled.
    pub nodes: u64,
    /// Depth transitions rejected by the feasibility check.
    pub pruned: u64,
    /// Area clears fired by co-located agents.
    pub combos: u64,
    /// Branch points handed to the worker pool.
    pub fan_outs: u64,
    /// Final-depth states that were checked for completion.
    pub leaves: u64,
}

impl SearchStats {
    #[inline]
    pub fn bump_nodes(&mut self) {
        self.nodes = self.nodes.saturating_add(1);
    }

    #[inline]
    pub fn bump_pruned(&mut self) {
        self.pruned = self.pruned.saturating_add(1);
    }

    #[inline]
    pub fn bump_combos(&mut self, delta: usize) {
        self.combos = self.combos.saturating_add(delta as u64);
    }

    #[inline]
    pub fn bump_fan_outs(&mut self) {
        self.fan_outs = self.fan_outs.saturating_add(1);
    }

    #[inline]
    pub fn bump_leaves(&mut self) {
        self.leaves = self.leaves.saturating_add(1);
    }

    pub fn merge(&mut self, other: &SearchStats) {
        self.nodes = self.nodes.saturating_add(other.nodes);
        self.pruned = self.pruned.saturating_add(other.pruned);
        self.combos = self.combos.saturating_add(other.combos);
        self.fan_outs = self.fan_outs.saturating_add(other.fan_outs);
        self.leaves = self.leaves.saturating_add(other.leaves);
    }
}
