use crate::board::Board;
use crate::core::cell::{Cell, CellKind};
use crate::distance::DistanceTable;

/// Precomputed "is there a box next door" facts.
///
/// Boxes never move, so this is computed once per puzzle from the initial board.
#[derive(Debug, Clone)]
pub struct Proximity {
    near_dust_box: Vec<bool>,
    near_recycle_box: Vec<bool>,
    /// Hops from each cell to the closest traversable cell next to a box (`u16::MAX` if none).
    dust_reach: Vec<u16>,
    recycle_reach: Vec<u16>,
}

impl Proximity {
    pub fn scan(board: &Board, distances: &DistanceTable) -> Self {
        let near_dust_box = adjacency_flags(board, CellKind::DustBox);
        let near_recycle_box = adjacency_flags(board, CellKind::RecycleBox);
        let dust_reach = reach_table(board, distances, &near_dust_box);
        let recycle_reach = reach_table(board, distances, &near_recycle_box);
        Self {
            near_dust_box,
            near_recycle_box,
            dust_reach,
            recycle_reach,
        }
    }

    /// Whether `cell` touches a box of kind `deposit` (orthogonally).
    #[inline]
    pub fn is_near(&self, cell: Cell, deposit: CellKind) -> bool {
        match deposit {
            CellKind::DustBox => self.near_dust_box[cell.index()],
            CellKind::RecycleBox => self.near_recycle_box[cell.index()],
            _ => false,
        }
    }

    /// Hops from `cell` to the nearest traversable cell touching a box of kind `deposit`.
    pub fn reach(&self, cell: Cell, deposit: CellKind) -> Option<u16> {
        let hops = match deposit {
            CellKind::DustBox => self.dust_reach[cell.index()],
            CellKind::RecycleBox => self.recycle_reach[cell.index()],
            _ => return None,
        };
        (hops != u16::MAX).then_some(hops)
    }
}

fn adjacency_flags(board: &Board, deposit: CellKind) -> Vec<bool> {
    let mut flags = vec![false; board.len()];
    for cell in board.inner_cells() {
        flags[cell.index()] = board
            .neighbours(cell)
            .iter()
            .any(|&n| board.kind(n) == deposit);
    }
    flags
}

fn reach_table(board: &Board, distances: &DistanceTable, near: &[bool]) -> Vec<u16> {
    let targets: Vec<Cell> = distances
        .traversable()
        .iter()
        .copied()
        .filter(|c| near[c.index()])
        .collect();

    let mut reach = vec![u16::MAX; board.len()];
    if targets.is_empty() {
        return reach;
    }
    for &from in distances.traversable() {
        reach[from.index()] = targets
            .iter()
            .filter_map(|&t| distances.get(from, t))
            .min()
            .unwrap_or(u16::MAX);
    }
    reach
}
