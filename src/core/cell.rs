use serde::{Deserialize, Serialize};

/// What occupies a board cell.
///
/// Agent start cells are not a kind of their own: they load as [`CellKind::Clean`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Dirty,
    Clean,
    /// Only a boy can mop it up.
    Pool,
    /// Only a girl can pick it up; it must then go into a dust box.
    Apple,
    /// Only a robot can pick it up; it must then go into a recycle box.
    Bottle,
    DustBox,
    RecycleBox,
    Obstacle,
}

impl CellKind {
    /// Whether an agent may stand on this cell.
    #[inline]
    pub fn is_traversable(self) -> bool {
        matches!(
            self,
            CellKind::Dirty | CellKind::Clean | CellKind::Pool | CellKind::Apple | CellKind::Bottle
        )
    }

    /// Whether the cell still has to be cleared before the puzzle is solved.
    #[inline]
    pub fn is_obligation(self) -> bool {
        matches!(
            self,
            CellKind::Dirty | CellKind::Pool | CellKind::Apple | CellKind::Bottle
        )
    }

    pub fn glyph(self) -> char {
        match self {
            CellKind::Dirty => '.',
            CellKind::Clean => '_',
            CellKind::Pool => '~',
            CellKind::Apple => 'a',
            CellKind::Bottle => 'b',
            CellKind::DustBox => 'D',
            CellKind::RecycleBox => 'R',
            CellKind::Obstacle => '#',
        }
    }
}

/// A cell of the padded board packed into a single `u16` (row-major, sentinel ring included).
///
/// Only a [`crate::board::Board`] hands these out, so every `Cell` is a valid index into the board
/// that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell(u16);

impl Cell {
    #[inline]
    pub(crate) fn new(index: usize) -> Cell {
        debug_assert!(index < u16::MAX as usize);
        Cell(index as u16)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
