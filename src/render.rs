//! Plain-text views of boards and solutions for the terminal.

use std::fmt::Write as _;

use crate::board::Board;
use crate::core::agent::Agent;
use crate::core::coord::Coord;
use crate::solution::Solution;

/// Steps printed per line in [`solution`].
const STEPS_PER_LINE: usize = 5;

fn coord(c: Coord) -> String {
    format!("[{},{}]", c.x, c.y)
}

/// The board as one glyph per cell, followed by one line per agent.
///
/// Glyphs: `.` dirty, `_` clean, `~` pool, `a` apple, `b` bottle, `D` dust box, `R` recycle box,
/// `#` obstacle.
pub fn board(board: &Board, agents: &[Agent]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}x{} board", board.width(), board.height());
    for y in 0..board.height() {
        let row: Vec<String> = (0..board.width())
            .filter_map(|x| board.cell_at(Coord::new(x as i32, y as i32)))
            .map(|cell| board.kind(cell).glyph().to_string())
            .collect();
        let _ = writeln!(out, "  {}", row.join(" "));
    }
    for a in agents {
        let _ = writeln!(
            out,
            "{}{}({}/{})",
            a.kind.label(),
            coord(board.coord_of(a.position)),
            a.steps,
            a.budget
        );
    }
    out
}

/// Every route as `Kind [x,y] -> [x,y](dir) ...`, wrapped every few steps.
pub fn solution(solution: &Solution) -> String {
    let mut out = String::new();
    for route in &solution.routes {
        let _ = write!(out, "{} {}", route.kind.label(), coord(route.start));
        for (i, (to, dir)) in route.path.iter().zip(route.directions()).enumerate() {
            if i > 0 && i % STEPS_PER_LINE == 0 {
                out.push_str("\n   ");
            }
            let _ = write!(out, " -> {}({})", coord(*to), dir.label());
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::agent::AgentKind;
    use crate::puzzle::Puzzle;
    use crate::search::Pass;
    use crate::solution::Route;

    #[test]
    fn board_shows_glyphs_and_agents() {
        let p = Puzzle::parse("3 2  2 0 5  8 10 6  1 4  0  0").unwrap();
        let text = board(p.board(), p.agents());
        assert_eq!(text, "3x2 board\n  _ . ~\n  D # a\nBoy[0,0](0/4)\n");
    }

    #[test]
    fn long_routes_wrap() {
        let path: Vec<Coord> = (1..=6).map(|x| Coord::new(x, 0)).collect();
        let s = Solution {
            pass: Pass::Strict,
            routes: vec![Route {
                kind: AgentKind::Robot,
                budget: 6,
                start: Coord::ORIGIN,
                path,
            }],
        };
        let text = solution(&s);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Robot [0,0] -> [1,0](right)"));
        assert_eq!(lines[1], "    -> [6,0](right)");
    }
}
