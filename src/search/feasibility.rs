//! Reachability pruning.
//!
//! A state is kept only if every outstanding obligation can still be reached in time by some agent
//! able to clear it, and every agent holding items can still get next to its box. The test ignores
//! interactions between agents, so it is necessary but not sufficient: it never throws away a
//! state that has a completion.

use crate::board::Board;
use crate::core::agent::Agent;
use crate::puzzle::Puzzle;

/// Whether the search may still succeed from `board` / `agents`.
///
/// `tolerance` widens every agent's budget for the estimate only (see
/// [`crate::search::COMBO_TOLERANCE`]).
pub fn can_still_finish(
    puzzle: &Puzzle,
    board: &Board,
    agents: &[Agent],
    tolerance: u32,
) -> bool {
    let distances = puzzle.distances();

    for (cell, kind) in board.outstanding() {
        let reachable = agents.iter().any(|a| {
            a.kind.can_clear(kind)
                && distances
                    .get(cell, a.position)
                    .is_some_and(|d| u32::from(d) + a.steps <= a.reach_budget(tolerance))
        });
        if !reachable {
            return false;
        }
    }

    agents.iter().all(|a| can_still_deposit(puzzle, a, tolerance))
}

/// An agent holding items needs at least one more step that lands next to its box.
fn can_still_deposit(puzzle: &Puzzle, agent: &Agent, tolerance: u32) -> bool {
    if agent.carried == 0 {
        return true;
    }
    let Some(deposit) = agent.kind.deposit_box() else {
        return true;
    };
    puzzle
        .proximity()
        .reach(agent.position, deposit)
        .is_some_and(|d| u32::from(d).max(1) + agent.steps <= agent.reach_budget(tolerance))
}
