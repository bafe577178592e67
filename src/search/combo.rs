//! The combo rule: two agents meeting on one cell after the same number of steps wipe every dirty
//! cell in the surrounding 3x3 square.
//!
//! There is no per-cell undo for combos. Callers snapshot the board before firing and restore the
//! snapshot afterwards, which also covers combos stacking across depths.

use crate::board::Board;
use crate::core::agent::Agent;
use crate::core::cell::Cell;

/// Cells where some pair of agents stands together with equal step counts, one entry per pair.
pub fn meeting_points(agents: &[Agent]) -> Vec<Cell> {
    let mut out = Vec::new();
    for (i, a) in agents.iter().enumerate() {
        for b in &agents[i + 1..] {
            if a.position == b.position && a.steps == b.steps {
                out.push(a.position);
            }
        }
    }
    out
}

/// Fire every combo available in the current configuration. Returns the number fired.
pub fn trigger_combos(board: &mut Board, agents: &[Agent]) -> usize {
    let points = meeting_points(agents);
    for &center in &points {
        board.clear_dirty_around(center);
    }
    points.len()
}
