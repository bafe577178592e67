//! Depth-synchronised backtracking over joint agent moves.
//!
//! A call `explore(depth, index)` moves the first agent at or after `index` that has taken exactly
//! `depth` steps and still has budget left, then recurses with `index + 1`. Once every agent has
//! either reached `depth + 1` steps or run out of budget, the depth is closed: at the final depth
//! the board is checked, otherwise the state is pruned, combos fire (relaxed pass) and the next
//! depth starts at agent 0.
//!
//! The serial path mutates one [`SearchState`] in place and undoes every step on the way back.
//! Move records are only written while unwinding a successful path, front first, so they come out
//! in chronological order.

use std::collections::VecDeque;

use crate::board::step::{apply_step, undo_step};
use crate::board::Board;
use crate::core::agent::Agent;
use crate::core::cell::Cell;
use crate::puzzle::Puzzle;
use crate::search::combo;
use crate::search::feasibility::can_still_finish;
use crate::search::parallel::SharedContext;
use crate::search::stats::SearchStats;
use crate::search::Pass;

/// Everything one exploration path mutates.
#[derive(Debug, Clone)]
pub(crate) struct SearchState {
    pub(crate) board: Board,
    pub(crate) agents: Vec<Agent>,
    /// Per agent, the cells stepped onto, first step first.
    pub(crate) routes: Vec<VecDeque<Cell>>,
}

impl SearchState {
    pub(crate) fn initial(puzzle: &Puzzle) -> Self {
        Self {
            board: puzzle.board().clone(),
            agents: puzzle.agents().to_vec(),
            routes: vec![VecDeque::new(); puzzle.agents().len()],
        }
    }
}

pub(crate) struct Explorer<'p> {
    pub(super) puzzle: &'p Puzzle,
    pub(super) pass: Pass,
    pub(super) shared: &'p SharedContext,
    pub(super) state: SearchState,
    pub(super) stats: SearchStats,
}

impl<'p> Explorer<'p> {
    pub(crate) fn new(puzzle: &'p Puzzle, pass: Pass, shared: &'p SharedContext) -> Self {
        Self {
            puzzle,
            pass,
            shared,
            state: SearchState::initial(puzzle),
            stats: SearchStats::default(),
        }
    }

    /// A private copy of the current state with fresh counters.
    pub(super) fn fork(&self) -> Self {
        Self {
            puzzle: self.puzzle,
            pass: self.pass,
            shared: self.shared,
            state: self.state.clone(),
            stats: SearchStats::default(),
        }
    }

    pub(crate) fn into_parts(self) -> (SearchState, SearchStats) {
        (self.state, self.stats)
    }

    /// Returns `true` once a complete solution lies beneath this call.
    ///
    /// `state.routes` then holds the solution.
    pub(crate) fn explore(&mut self, depth: u32, index: usize) -> bool {
        if self.shared.is_solved() {
            return false;
        }
        self.stats.bump_nodes();

        let next = (index..self.state.agents.len()).find(|&i| {
            let a = &self.state.agents[i];
            a.steps == depth && a.steps < a.budget
        });

        match next {
            Some(ci) => self.advance_agent(depth, ci),
            None => self.close_depth(depth),
        }
    }

    fn advance_agent(&mut self, depth: u32, ci: usize) -> bool {
        let moves = self.candidate_moves(ci);

        if moves.len() > 1 {
            if let Some(reservation) = self.shared.try_reserve(moves.len() - 1) {
                return self.fan_out(depth, ci, &moves, reservation);
            }
        }

        for &to in &moves {
            let undo = apply_step(
                &mut self.state.board,
                self.puzzle.proximity(),
                &mut self.state.agents[ci],
                to,
            );
            if self.explore(depth, ci + 1) {
                self.state.routes[ci].push_front(to);
                return true;
            }
            undo_step(&mut self.state.board, &mut self.state.agents[ci], undo);
        }
        false
    }

    /// Legal destinations for agent `ci` in try order.
    ///
    /// Up, left, right, down, minus walls and the cell the agent just left. The strict pass tries
    /// destinations with nothing to clear first; the sort is stable so the base order is kept
    /// within each group.
    pub(super) fn candidate_moves(&self, ci: usize) -> Vec<Cell> {
        let board = &self.state.board;
        let agent = &self.state.agents[ci];

        let mut moves: Vec<Cell> = board
            .neighbours(agent.position)
            .into_iter()
            .filter(|&c| c != agent.previous && board.kind(c).is_traversable())
            .collect();

        if self.pass.defers_obligations() {
            moves.sort_by_key(|&c| board.kind(c).is_obligation());
        }
        moves
    }

    fn close_depth(&mut self, depth: u32) -> bool {
        if depth >= self.puzzle.max_budget() {
            self.stats.bump_leaves();
            let done = self.state.board.is_swept()
                && self.state.agents.iter().all(|a| a.carried == 0);
            if done {
                self.shared.mark_solved();
            }
            return done;
        }

        if !can_still_finish(
            self.puzzle,
            &self.state.board,
            &self.state.agents,
            self.pass.tolerance(),
        ) {
            self.stats.bump_pruned();
            return false;
        }

        if !self.pass.fires_combos() {
            return self.explore(depth + 1, 0);
        }

        if combo::meeting_points(&self.state.agents).is_empty() {
            return self.explore(depth + 1, 0);
        }

        let snapshot = self.state.board.snapshot();
        let fired = combo::trigger_combos(&mut self.state.board, &self.state.agents);
        self.stats.bump_combos(fired);
        let found = self.explore(depth + 1, 0);
        self.state.board.restore(&snapshot);
        found
    }
}
