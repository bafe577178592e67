//! Single-step move effects and their exact inverse.
//!
//! Every search path pairs [`apply_step`] with [`undo_step`] in LIFO order, so the board and the
//! agent never need to be copied on the serial path.

use crate::board::proximity::Proximity;
use crate::board::Board;
use crate::core::agent::Agent;
use crate::core::cell::{Cell, CellKind};

/// Everything [`undo_step`] needs to put a board cell and an agent back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepUndo {
    cell: Cell,
    kind: CellKind,
    previous: Cell,
    carried: u32,
}

/// Move `agent` onto `to` and apply the effect of arriving there.
///
/// Order matters: the agent first empties its hands if `to` touches its box, and only then picks
/// up whatever lies on `to`. The caller is responsible for `to` being a legal destination.
pub fn apply_step(
    board: &mut Board,
    proximity: &Proximity,
    agent: &mut Agent,
    to: Cell,
) -> StepUndo {
    let kind = board.kind(to);
    let undo = StepUndo {
        cell: to,
        kind,
        previous: agent.previous,
        carried: agent.carried,
    };

    agent.previous = agent.position;
    agent.position = to;
    agent.steps += 1;

    if let Some(deposit) = agent.kind.deposit_box() {
        if proximity.is_near(to, deposit) {
            agent.carried = 0;
        }
    }

    match kind {
        CellKind::Dirty => board.set_kind(to, CellKind::Clean),
        CellKind::Pool if agent.kind.can_clear(kind) => board.set_kind(to, CellKind::Clean),
        CellKind::Apple | CellKind::Bottle if agent.kind.can_clear(kind) => {
            agent.carried += 1;
            board.set_kind(to, CellKind::Clean);
        }
        _ => {}
    }

    undo
}

/// Reverse the most recent [`apply_step`] of `agent`.
pub fn undo_step(board: &mut Board, agent: &mut Agent, undo: StepUndo) {
    debug_assert_eq!(agent.position, undo.cell);
    board.set_kind(undo.cell, undo.kind);
    agent.position = agent.previous;
    agent.previous = undo.previous;
    agent.carried = undo.carried;
    agent.steps -= 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::agent::AgentKind;
    use crate::core::coord::Coord;
    use crate::distance::DistanceTable;

    fn line(kinds: &[CellKind]) -> (Board, Proximity) {
        let mut board = Board::new(kinds.len(), 1).unwrap();
        for (x, &k) in kinds.iter().enumerate() {
            let cell = board.cell_at(Coord::new(x as i32, 0)).unwrap();
            board.set_kind(cell, k);
        }
        let distances = DistanceTable::compute(&board);
        let prox = Proximity::scan(&board, &distances);
        (board, prox)
    }

    fn cell(board: &Board, x: i32) -> Cell {
        board.cell_at(Coord::new(x, 0)).unwrap()
    }

    #[test]
    fn dirty_is_cleaned_by_anyone() {
        let (mut board, prox) = line(&[CellKind::Clean, CellKind::Dirty]);
        let mut robot = Agent::new(AgentKind::Robot, cell(&board, 0), 3);
        let to = cell(&board, 1);
        apply_step(&mut board, &prox, &mut robot, to);
        assert_eq!(board.kind(cell(&board, 1)), CellKind::Clean);
        assert_eq!(robot.carried, 0);
        assert_eq!(robot.steps, 1);
        assert_eq!(robot.previous, cell(&board, 0));
    }

    #[test]
    fn foreign_targets_are_left_alone() {
        let (mut board, prox) = line(&[CellKind::Clean, CellKind::Pool, CellKind::Apple]);
        let mut robot = Agent::new(AgentKind::Robot, cell(&board, 0), 3);
        let to = cell(&board, 1);
        apply_step(&mut board, &prox, &mut robot, to);
        let to = cell(&board, 2);
        apply_step(&mut board, &prox, &mut robot, to);
        assert_eq!(board.kind(cell(&board, 1)), CellKind::Pool);
        assert_eq!(board.kind(cell(&board, 2)), CellKind::Apple);
        assert_eq!(robot.carried, 0);
    }

    #[test]
    fn pool_is_mopped_without_carrying() {
        let (mut board, prox) = line(&[CellKind::Clean, CellKind::Pool]);
        let mut boy = Agent::new(AgentKind::Boy, cell(&board, 0), 1);
        let to = cell(&board, 1);
        apply_step(&mut board, &prox, &mut boy, to);
        assert_eq!(board.kind(cell(&board, 1)), CellKind::Clean);
        assert_eq!(boy.carried, 0);
    }

    #[test]
    fn clean_cells_stay_clean() {
        let (mut board, prox) = line(&[CellKind::Clean, CellKind::Clean]);
        let mut girl = Agent::new(AgentKind::Girl, cell(&board, 0), 1);
        girl.carried = 2;
        let to = cell(&board, 1);
        apply_step(&mut board, &prox, &mut girl, to);
        assert_eq!(board.kind(cell(&board, 1)), CellKind::Clean);
        assert_eq!(girl.carried, 2);
    }

    #[test]
    fn items_are_dropped_before_pickup() {
        // An apple right next to the dust box: the girl arrives, empties her hands, then picks
        // the apple up, so she leaves holding exactly one.
        let (mut board, prox) = line(&[CellKind::Clean, CellKind::Apple, CellKind::DustBox]);
        let mut girl = Agent::new(AgentKind::Girl, cell(&board, 0), 1);
        girl.carried = 3;
        let to = cell(&board, 1);
        apply_step(&mut board, &prox, &mut girl, to);
        assert_eq!(girl.carried, 1);
    }

    #[test]
    fn undo_restores_everything() {
        let (mut board, prox) = line(&[
            CellKind::Clean,
            CellKind::Bottle,
            CellKind::Dirty,
            CellKind::RecycleBox,
        ]);
        let mut robot = Agent::new(AgentKind::Robot, cell(&board, 0), 2);
        let before_board = board.clone();
        let before_robot = robot.clone();

        let to = cell(&board, 1);
        let first = apply_step(&mut board, &prox, &mut robot, to);
        assert_eq!(robot.carried, 1);
        let mid_board = board.clone();
        let mid_robot = robot.clone();

        let to = cell(&board, 2);
        let second = apply_step(&mut board, &prox, &mut robot, to);
        assert_eq!(robot.carried, 0);

        undo_step(&mut board, &mut robot, second);
        assert_eq!(board, mid_board);
        assert_eq!(robot, mid_robot);

        undo_step(&mut board, &mut robot, first);
        assert_eq!(board, before_board);
        assert_eq!(robot, before_robot);
    }
}
