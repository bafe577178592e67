//! Found routes in board coordinates, and an independent replay that checks them.
//!
//! A [`Solution`] is detached from the search: it stores coordinates rather than packed cells, can
//! be written out as JSON, and [`Solution::verify`] re-simulates it against a fresh copy of the
//! puzzle using the same step and combo rules as the search.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::step::apply_step;
use crate::core::agent::AgentKind;
use crate::core::cell::{Cell, CellKind};
use crate::core::coord::{Coord, Direction};
use crate::puzzle::Puzzle;
use crate::search::combo::trigger_combos;
use crate::search::Pass;

/// One agent's walk, first step first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub kind: AgentKind,
    pub budget: u32,
    pub start: Coord,
    pub path: Vec<Coord>,
}

impl Route {
    /// Direction of each step.
    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        std::iter::once(self.start)
            .chain(self.path.iter().copied())
            .zip(self.path.iter().copied())
            .map(|(from, to)| Direction::between(from, to))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// The pass that found it. Replays fire combos only for [`Pass::Relaxed`].
    pub pass: Pass,
    /// One route per agent, in roster order.
    pub routes: Vec<Route>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error("solution has {found} routes, puzzle has {expected} agents")]
    RouteCount { expected: usize, found: usize },

    #[error("route {agent} does not match the agent it replaces")]
    AgentMismatch { agent: usize },

    #[error("route {agent} has {steps} steps, its budget is {budget}")]
    BudgetMismatch {
        agent: usize,
        budget: u32,
        steps: usize,
    },

    #[error("route {agent} leaves the board at step {step} ({at:?})")]
    OffBoard { agent: usize, step: usize, at: Coord },

    #[error("route {agent} jumps at step {step} ({at:?})")]
    NotAdjacent { agent: usize, step: usize, at: Coord },

    #[error("route {agent} turns straight back at step {step} ({at:?})")]
    UTurn { agent: usize, step: usize, at: Coord },

    #[error("route {agent} walks into an obstacle or box at step {step} ({at:?})")]
    Blocked { agent: usize, step: usize, at: Coord },

    #[error("{kind:?} left at {at:?}")]
    Unswept { at: Coord, kind: CellKind },

    #[error("agent {agent} still carries {count} item(s)")]
    ItemsCarried { agent: usize, count: u32 },
}

impl Solution {
    /// Convert per-agent step records from the search into coordinates.
    pub fn from_routes(puzzle: &Puzzle, pass: Pass, routes: &[VecDeque<Cell>]) -> Self {
        let board = puzzle.board();
        let routes = puzzle
            .agents()
            .iter()
            .zip(routes)
            .map(|(agent, cells)| Route {
                kind: agent.kind,
                budget: agent.budget,
                start: board.coord_of(agent.start),
                path: cells.iter().map(|&c| board.coord_of(c)).collect(),
            })
            .collect();
        Self { pass, routes }
    }

    /// Replay every route round by round and check that the board ends up swept.
    pub fn verify(&self, puzzle: &Puzzle) -> Result<(), ReplayError> {
        let mut board = puzzle.board().clone();
        let mut agents = puzzle.agents().to_vec();

        if self.routes.len() != agents.len() {
            return Err(ReplayError::RouteCount {
                expected: agents.len(),
                found: self.routes.len(),
            });
        }
        for (i, (route, agent)) in self.routes.iter().zip(&agents).enumerate() {
            if route.kind != agent.kind || route.start != board.coord_of(agent.start) {
                return Err(ReplayError::AgentMismatch { agent: i });
            }
            if route.path.len() != agent.budget as usize {
                return Err(ReplayError::BudgetMismatch {
                    agent: i,
                    budget: agent.budget,
                    steps: route.path.len(),
                });
            }
        }

        for depth in 0..puzzle.max_budget() {
            let step = depth as usize;
            for (i, route) in self.routes.iter().enumerate() {
                let agent = &mut agents[i];
                if depth >= agent.budget {
                    continue;
                }
                let at = route.path[step];
                let to = board.cell_at(at).ok_or(ReplayError::OffBoard {
                    agent: i,
                    step,
                    at,
                })?;
                if !board.neighbours(agent.position).contains(&to) {
                    return Err(ReplayError::NotAdjacent { agent: i, step, at });
                }
                if to == agent.previous {
                    return Err(ReplayError::UTurn { agent: i, step, at });
                }
                if !board.kind(to).is_traversable() {
                    return Err(ReplayError::Blocked { agent: i, step, at });
                }
                apply_step(&mut board, puzzle.proximity(), agent, to);
            }
            if self.pass.fires_combos() {
                trigger_combos(&mut board, &agents);
            }
        }

        if let Some((cell, kind)) = board.outstanding().next() {
            return Err(ReplayError::Unswept {
                at: board.coord_of(cell),
                kind,
            });
        }
        if let Some((i, a)) = agents.iter().enumerate().find(|(_, a)| a.carried > 0) {
            return Err(ReplayError::ItemsCarried {
                agent: i,
                count: a.carried,
            });
        }
        Ok(())
    }
}
