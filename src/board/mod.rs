//! The mutable board: cell kinds on a grid padded with a ring of obstacles.
//!
//! The sentinel ring lets every inner cell look at its four (or eight) neighbours without bounds
//! checks. Agents only ever stand on inner cells, and the ring is never written to.

pub mod proximity;
pub mod step;

use crate::core::cell::{Cell, CellKind};
use crate::core::coord::{Coord, Direction, DIRECTIONS};
use crate::error::PuzzleError;

/// Largest padded board we accept.
///
/// Cells are packed into `u16` and the distance table is quadratic in the cell count.
pub const MAX_CELLS: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    stride: usize,
    cells: Vec<CellKind>,
}

impl Board {
    /// An all-clean `width x height` board inside its obstacle ring.
    pub fn new(width: usize, height: usize) -> Result<Self, PuzzleError> {
        let too_large = || PuzzleError::BoardTooLarge {
            width,
            height,
            max: MAX_CELLS,
        };
        let stride = width.checked_add(2).ok_or_else(too_large)?;
        let rows = height.checked_add(2).ok_or_else(too_large)?;
        let total = stride
            .checked_mul(rows)
            .filter(|&n| n <= MAX_CELLS)
            .ok_or_else(too_large)?;

        let mut cells = vec![CellKind::Obstacle; total];
        for y in 0..height {
            let row = (y + 1) * stride;
            cells[row + 1..row + 1 + width].fill(CellKind::Clean);
        }

        Ok(Self {
            width,
            height,
            stride,
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row length of the padded grid.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of padded cells, sentinel ring included.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn cell_at(&self, c: Coord) -> Option<Cell> {
        if c.x < 0 || c.y < 0 {
            return None;
        }
        let (x, y) = (c.x as usize, c.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(Cell::new((y + 1) * self.stride + x + 1))
    }

    pub fn coord_of(&self, cell: Cell) -> Coord {
        let i = cell.index();
        Coord::new(
            (i % self.stride) as i32 - 1,
            (i / self.stride) as i32 - 1,
        )
    }

    pub fn is_border(&self, cell: Cell) -> bool {
        let (x, y) = (cell.index() % self.stride, cell.index() / self.stride);
        x == 0 || y == 0 || x == self.width + 1 || y == self.height + 1
    }

    #[inline]
    pub fn kind(&self, cell: Cell) -> CellKind {
        self.cells[cell.index()]
    }

    #[inline]
    pub fn set_kind(&mut self, cell: Cell, kind: CellKind) {
        debug_assert!(!self.is_border(cell), "sentinel ring is read-only");
        self.cells[cell.index()] = kind;
    }

    /// The neighbour of an inner cell in direction `dir`.
    #[inline]
    pub fn step(&self, cell: Cell, dir: Direction) -> Cell {
        debug_assert!(!self.is_border(cell));
        let i = cell.index();
        Cell::new(match dir {
            Direction::Up => i - self.stride,
            Direction::Left => i - 1,
            Direction::Right => i + 1,
            Direction::Down => i + self.stride,
        })
    }

    /// Orthogonal neighbours in [`DIRECTIONS`] order (up, left, right, down).
    #[inline]
    pub fn neighbours(&self, cell: Cell) -> [Cell; 4] {
        DIRECTIONS.map(|dir| self.step(cell, dir))
    }

    /// Inner cells in row-major order.
    pub fn inner_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).map(move |x| Cell::new((y + 1) * self.stride + x + 1))
        })
    }

    /// Cells that still have to be cleared, in row-major order.
    pub fn outstanding(&self) -> impl Iterator<Item = (Cell, CellKind)> + '_ {
        self.inner_cells()
            .map(|c| (c, self.kind(c)))
            .filter(|(_, k)| k.is_obligation())
    }

    pub fn is_swept(&self) -> bool {
        self.outstanding().next().is_none()
    }

    pub fn snapshot(&self) -> Vec<CellKind> {
        self.cells.clone()
    }

    pub fn restore(&mut self, snapshot: &[CellKind]) {
        self.cells.copy_from_slice(snapshot);
    }

    /// Clean every dirty cell in the 3x3 square centred on `center`. Returns how many changed.
    pub fn clear_dirty_around(&mut self, center: Cell) -> usize {
        debug_assert!(!self.is_border(center));
        let top_left = center.index() - self.stride - 1;
        let mut cleared = 0;
        for row in 0..3 {
            for col in 0..3 {
                let cell = &mut self.cells[top_left + row * self.stride + col];
                if *cell == CellKind::Dirty {
                    *cell = CellKind::Clean;
                    cleared += 1;
                }
            }
        }
        cleared
    }
}
