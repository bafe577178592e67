//! Puzzle definition: the initial board, the agent roster and everything precomputed from them.
//!
//! Text format (whitespace separated integers):
//!
//! ```text
//! width height
//! <width*height cell codes, row-major>
//! <boy count>   <one budget per boy>
//! <girl count>  <one budget per girl>
//! <robot count> <one budget per robot>
//! ```
//!
//! Cell codes: 0 dirty, 1 clean, 2 boy, 3 girl, 4 robot, 5 pool, 6 apple, 7 bottle, 8 dust box,
//! 9 recycle box, 10 obstacle. Any other integer is read as an obstacle. Budgets are assigned to
//! agents of a kind in row-major discovery order.

use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

use tracing::debug;

use crate::board::proximity::Proximity;
use crate::board::Board;
use crate::core::agent::{Agent, AgentKind, AGENT_KINDS};
use crate::core::cell::{Cell, CellKind};
use crate::distance::DistanceTable;
use crate::error::PuzzleError;

#[derive(Debug, Clone)]
pub struct Puzzle {
    board: Board,
    agents: Vec<Agent>,
    distances: DistanceTable,
    proximity: Proximity,
    max_budget: u32,
}

impl Puzzle {
    /// Bundle a board and roster, precomputing distances and box proximity.
    ///
    /// Agents are expected on traversable inner cells of `board`.
    pub fn new(board: Board, agents: Vec<Agent>) -> Self {
        let distances = DistanceTable::compute(&board);
        let proximity = Proximity::scan(&board, &distances);
        let max_budget = agents.iter().map(|a| a.budget).max().unwrap_or(0);
        Self {
            board,
            agents,
            distances,
            proximity,
            max_budget,
        }
    }

    pub fn parse(input: &str) -> Result<Self, PuzzleError> {
        let mut tokens = Tokens::new(input);

        let width: usize = tokens.next("board width")?;
        let height: usize = tokens.next("board height")?;
        let mut board = Board::new(width, height)?;

        let mut starts: [Vec<Cell>; 3] = Default::default();
        let cells: Vec<Cell> = board.inner_cells().collect();
        for cell in cells {
            match Tile::decode(tokens.next("cell code")?) {
                Tile::Floor(kind) => board.set_kind(cell, kind),
                // The agent stands on a clean cell.
                Tile::Start(kind) => starts[roster_slot(kind)].push(cell),
            }
        }

        let mut agents = Vec::new();
        for (kind, found) in AGENT_KINDS.into_iter().zip(&starts) {
            let declared: usize = tokens.next("agent count")?;
            if declared != found.len() {
                return Err(PuzzleError::AgentCountMismatch {
                    kind,
                    declared,
                    found: found.len(),
                });
            }
            for &start in found {
                let budget: u32 = tokens.next("step budget")?;
                agents.push(Agent::new(kind, start, budget));
            }
        }

        Ok(Self::new(board, agents))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PuzzleError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PuzzleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let puzzle = Self::parse(&text)?;
        debug!(
            path = %path.display(),
            width = puzzle.board.width(),
            height = puzzle.board.height(),
            agents = puzzle.agents.len(),
            max_budget = puzzle.max_budget,
            "puzzle loaded"
        );
        Ok(puzzle)
    }

    /// The board as loaded, before any agent has moved.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Agents in roster order: boys, then girls, then robots, each in discovery order.
    #[inline]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    #[inline]
    pub fn distances(&self) -> &DistanceTable {
        &self.distances
    }

    #[inline]
    pub fn proximity(&self) -> &Proximity {
        &self.proximity
    }

    /// The largest budget of any agent: the depth at which every agent has finished walking.
    #[inline]
    pub fn max_budget(&self) -> u32 {
        self.max_budget
    }
}

enum Tile {
    Floor(CellKind),
    Start(AgentKind),
}

impl Tile {
    fn decode(code: i64) -> Tile {
        match code {
            0 => Tile::Floor(CellKind::Dirty),
            1 => Tile::Floor(CellKind::Clean),
            2 => Tile::Start(AgentKind::Boy),
            3 => Tile::Start(AgentKind::Girl),
            4 => Tile::Start(AgentKind::Robot),
            5 => Tile::Floor(CellKind::Pool),
            6 => Tile::Floor(CellKind::Apple),
            7 => Tile::Floor(CellKind::Bottle),
            8 => Tile::Floor(CellKind::DustBox),
            9 => Tile::Floor(CellKind::RecycleBox),
            _ => Tile::Floor(CellKind::Obstacle),
        }
    }
}

fn roster_slot(kind: AgentKind) -> usize {
    match kind {
        AgentKind::Boy => 0,
        AgentKind::Girl => 1,
        AgentKind::Robot => 2,
    }
}

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
    position: usize,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            inner: input.split_whitespace(),
            position: 0,
        }
    }

    fn next<T: FromStr>(&mut self, expected: &'static str) -> Result<T, PuzzleError> {
        let token = self
            .inner
            .next()
            .ok_or(PuzzleError::UnexpectedEnd { expected })?;
        self.position += 1;
        token.parse().map_err(|_| PuzzleError::InvalidToken {
            position: self.position,
            token: token.to_string(),
            expected,
        })
    }
}
