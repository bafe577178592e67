//! All-pairs shortest hop counts between traversable cells.
//!
//! Cells only ever turn from an obligation into [`CellKind::Clean`](crate::core::cell::CellKind)
//! during a search, so traversability is fixed at load time and the table never needs updating.

use crate::board::Board;
use crate::core::cell::Cell;

const NO_SLOT: u16 = u16::MAX;
const UNREACHABLE: u16 = u16::MAX;

/// Dense `slots x slots` hop matrix over the traversable cells of a board.
///
/// Traversable cells are compacted into slots so the cubic relaxation skips walls entirely.
#[derive(Debug, Clone)]
pub struct DistanceTable {
    slot_of: Vec<u16>,
    cells: Vec<Cell>,
    hops: Vec<u16>,
}

impl DistanceTable {
    /// Floyd–Warshall over the traversable cells of `board`.
    pub fn compute(board: &Board) -> Self {
        let cells: Vec<Cell> = board
            .inner_cells()
            .filter(|&c| board.kind(c).is_traversable())
            .collect();
        let n = cells.len();

        let mut slot_of = vec![NO_SLOT; board.len()];
        for (slot, c) in cells.iter().enumerate() {
            slot_of[c.index()] = slot as u16;
        }

        let mut hops = vec![UNREACHABLE; n * n];
        for (i, &c) in cells.iter().enumerate() {
            hops[i * n + i] = 0;
            for nb in board.neighbours(c) {
                let j = slot_of[nb.index()];
                if j != NO_SLOT {
                    hops[i * n + j as usize] = 1;
                }
            }
        }

        for k in 0..n {
            for i in 0..n {
                let ik = hops[i * n + k];
                if ik == UNREACHABLE {
                    continue;
                }
                for j in 0..n {
                    let kj = hops[k * n + j];
                    if kj == UNREACHABLE {
                        continue;
                    }
                    // Both legs are below the cell count, so the sum cannot overflow.
                    let via = ik + kj;
                    if via < hops[i * n + j] {
                        hops[i * n + j] = via;
                    }
                }
            }
        }

        Self {
            slot_of,
            cells,
            hops,
        }
    }

    /// Minimum hops between two cells, or `None` if either is not traversable or no path exists.
    #[inline]
    pub fn get(&self, from: Cell, to: Cell) -> Option<u16> {
        let a = self.slot_of[from.index()];
        let b = self.slot_of[to.index()];
        if a == NO_SLOT || b == NO_SLOT {
            return None;
        }
        let h = self.hops[a as usize * self.cells.len() + b as usize];
        (h != UNREACHABLE).then_some(h)
    }

    /// Traversable cells, row-major.
    pub fn traversable(&self) -> &[Cell] {
        &self.cells
    }
}
