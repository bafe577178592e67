use std::collections::VecDeque;

use proptest::prelude::*;

use sweep_optimizer::board::step::{apply_step, undo_step};
use sweep_optimizer::board::Board;
use sweep_optimizer::core::agent::{Agent, AgentKind, AGENT_KINDS};
use sweep_optimizer::core::cell::{Cell, CellKind};
use sweep_optimizer::core::coord::Coord;
use sweep_optimizer::distance::DistanceTable;
use sweep_optimizer::puzzle::Puzzle;

const KINDS: [CellKind; 8] = [
    CellKind::Dirty,
    CellKind::Clean,
    CellKind::Pool,
    CellKind::Apple,
    CellKind::Bottle,
    CellKind::DustBox,
    CellKind::RecycleBox,
    CellKind::Obstacle,
];

fn arb_board() -> impl Strategy<Value = Board> {
    (1usize..=5, 1usize..=4).prop_flat_map(|(w, h)| {
        prop::collection::vec(prop::sample::select(KINDS.to_vec()), w * h).prop_map(move |kinds| {
            let mut board = Board::new(w, h).unwrap();
            for (i, kind) in kinds.into_iter().enumerate() {
                let c = Coord::new((i % w) as i32, (i / w) as i32);
                board.set_kind(board.cell_at(c).unwrap(), kind);
            }
            board
        })
    })
}

fn bfs(board: &Board, from: Cell) -> Vec<Option<u16>> {
    let mut dist = vec![None; board.len()];
    dist[from.index()] = Some(0u16);
    let mut queue = VecDeque::from([from]);
    while let Some(c) = queue.pop_front() {
        let d = dist[c.index()].unwrap();
        for n in board.neighbours(c) {
            if board.kind(n).is_traversable() && dist[n.index()].is_none() {
                dist[n.index()] = Some(d + 1);
                queue.push_back(n);
            }
        }
    }
    dist
}

proptest! {
    #[test]
    fn distances_match_breadth_first_search(board in arb_board()) {
        let table = DistanceTable::compute(&board);
        let cells = table.traversable().to_vec();

        for &a in &cells {
            prop_assert_eq!(table.get(a, a), Some(0));
            let reference = bfs(&board, a);
            for &b in &cells {
                prop_assert_eq!(table.get(a, b), reference[b.index()]);
                prop_assert_eq!(table.get(a, b), table.get(b, a));
            }
        }
    }

    #[test]
    fn distances_obey_the_triangle_inequality(board in arb_board()) {
        let table = DistanceTable::compute(&board);
        let cells = table.traversable();
        for &a in cells {
            for &b in cells {
                let Some(ab) = table.get(a, b) else { continue };
                for &c in cells {
                    if let Some(bc) = table.get(b, c) {
                        let ac = table.get(a, c);
                        prop_assert!(ac.is_some_and(|ac| ac <= ab + bc));
                    }
                }
            }
        }
    }

    #[test]
    fn non_traversable_cells_have_no_distance(board in arb_board()) {
        let table = DistanceTable::compute(&board);
        let probe = table.traversable().first().copied();
        for cell in board.inner_cells() {
            if !board.kind(cell).is_traversable() {
                prop_assert_eq!(table.get(cell, cell), None);
                if let Some(p) = probe {
                    prop_assert_eq!(table.get(p, cell), None);
                }
            }
        }
    }

    #[test]
    fn undo_restores_board_and_agent(
        board in arb_board(),
        kind in prop::sample::select(AGENT_KINDS.to_vec()),
        start_pick in any::<prop::sample::Index>(),
        choices in prop::collection::vec(any::<prop::sample::Index>(), 0..12),
    ) {
        let traversable: Vec<Cell> = board
            .inner_cells()
            .filter(|&c| board.kind(c).is_traversable())
            .collect();
        prop_assume!(!traversable.is_empty());

        let start = *start_pick.get(&traversable);
        let puzzle = Puzzle::new(board, vec![Agent::new(kind, start, choices.len() as u32)]);
        let mut board = puzzle.board().clone();
        let mut agent = puzzle.agents()[0].clone();
        if kind != AgentKind::Boy {
            agent.carried = 1;
        }
        let (board0, agent0) = (board.clone(), agent.clone());

        let mut undos = Vec::new();
        for pick in &choices {
            let moves: Vec<Cell> = board
                .neighbours(agent.position)
                .into_iter()
                .filter(|&c| c != agent.previous && board.kind(c).is_traversable())
                .collect();
            if moves.is_empty() {
                break;
            }
            undos.push(apply_step(&mut board, puzzle.proximity(), &mut agent, *pick.get(&moves)));
        }
        prop_assert_eq!(agent.steps as usize, undos.len());

        while let Some(undo) = undos.pop() {
            undo_step(&mut board, &mut agent, undo);
        }
        prop_assert_eq!(&board, &board0);
        prop_assert_eq!(&agent, &agent0);
    }

    #[test]
    fn stepping_never_creates_obligations(
        board in arb_board(),
        kind in prop::sample::select(AGENT_KINDS.to_vec()),
        start_pick in any::<prop::sample::Index>(),
        choices in prop::collection::vec(any::<prop::sample::Index>(), 0..12),
    ) {
        let traversable: Vec<Cell> = board
            .inner_cells()
            .filter(|&c| board.kind(c).is_traversable())
            .collect();
        prop_assume!(!traversable.is_empty());

        let start = *start_pick.get(&traversable);
        let puzzle = Puzzle::new(board, vec![Agent::new(kind, start, 12)]);
        let mut board = puzzle.board().clone();
        let mut agent = puzzle.agents()[0].clone();

        for pick in &choices {
            let moves: Vec<Cell> = board
                .neighbours(agent.position)
                .into_iter()
                .filter(|&c| c != agent.previous && board.kind(c).is_traversable())
                .collect();
            if moves.is_empty() {
                break;
            }
            let before = board.outstanding().count();
            apply_step(&mut board, puzzle.proximity(), &mut agent, *pick.get(&moves));
            prop_assert!(board.outstanding().count() <= before);
            prop_assert!(board.kind(agent.position).is_traversable());
        }
    }
}
