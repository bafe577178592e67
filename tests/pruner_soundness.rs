//! The pruned search must agree with an unpruned enumeration of every walk.

use proptest::prelude::*;

use sweep_optimizer::board::step::{apply_step, undo_step};
use sweep_optimizer::board::Board;
use sweep_optimizer::config::SolverConfig;
use sweep_optimizer::core::agent::Agent;
use sweep_optimizer::puzzle::Puzzle;
use sweep_optimizer::search::{Pass, Solver};

/// Whether some combination of full-length walks leaves the board swept, without pruning.
///
/// Walks are enumerated one agent after another. Without combos agents never affect each other's
/// moves, so the order does not change which boards are reachable.
fn brute_force(puzzle: &Puzzle) -> bool {
    fn walk(puzzle: &Puzzle, board: &mut Board, agents: &mut [Agent], i: usize) -> bool {
        let Some(agent) = agents.get(i) else {
            return board.is_swept() && agents.iter().all(|a| a.carried == 0);
        };
        if agent.steps == agent.budget {
            return walk(puzzle, board, agents, i + 1);
        }
        let (position, previous) = (agent.position, agent.previous);
        for to in board.neighbours(position) {
            if to == previous || !board.kind(to).is_traversable() {
                continue;
            }
            let undo = apply_step(board, puzzle.proximity(), &mut agents[i], to);
            let found = walk(puzzle, board, agents, i);
            undo_step(board, &mut agents[i], undo);
            if found {
                return true;
            }
        }
        false
    }

    let mut board = puzzle.board().clone();
    let mut agents = puzzle.agents().to_vec();
    walk(puzzle, &mut board, &mut agents, 0)
}

fn strict(puzzle: &Puzzle) -> bool {
    let report = Solver::new(puzzle, SolverConfig::default()).run_pass(Pass::Strict);
    if let Some(solution) = &report.solution {
        solution.verify(puzzle).unwrap();
    }
    report.solution.is_some()
}

#[test]
fn single_boy_in_every_three_by_three_room() {
    // Dirty, clean or wall around a boy standing in the middle.
    const CODES: [u32; 3] = [0, 1, 10];
    let mut solvable = 0;

    for mask in 0..3u32.pow(8) {
        let mut codes = Vec::with_capacity(9);
        let mut rest = mask;
        for i in 0..9 {
            if i == 4 {
                codes.push(2);
            } else {
                codes.push(CODES[(rest % 3) as usize]);
                rest /= 3;
            }
        }
        let cells: Vec<String> = codes.iter().map(u32::to_string).collect();

        for budget in 1..=4 {
            let text = format!("3 3 {} 1 {budget} 0 0", cells.join(" "));
            let puzzle = Puzzle::parse(&text).unwrap();
            let expected = brute_force(&puzzle);
            assert_eq!(strict(&puzzle), expected, "{text}");
            solvable += usize::from(expected);
        }
    }

    assert!(solvable > 0);
}

fn arb_two_agent_puzzle() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(prop::sample::select(vec![0u32, 0, 1, 5, 6, 8, 10]), 12),
        0usize..12,
        0usize..12,
        0u32..=3,
        0u32..=3,
    )
        .prop_filter("agents need distinct cells", |(_, b, g, _, _)| b != g)
        .prop_map(|(mut codes, boy, girl, boy_budget, girl_budget)| {
            codes[boy] = 2;
            codes[girl] = 3;
            let cells: Vec<String> = codes.iter().map(u32::to_string).collect();
            format!(
                "4 3 {} 1 {boy_budget} 1 {girl_budget} 0",
                cells.join(" ")
            )
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn boy_and_girl_match_exhaustive_walks(text in arb_two_agent_puzzle()) {
        let puzzle = Puzzle::parse(&text).unwrap();
        prop_assert_eq!(strict(&puzzle), brute_force(&puzzle), "{}", text);
    }
}
