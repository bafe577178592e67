use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A zero-based board coordinate: `x` grows to the right, `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const ORIGIN: Coord = Coord { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Coord {
    type Output = Coord;

    #[inline]
    fn add(self, rhs: Coord) -> Self::Output {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coord {
    type Output = Coord;

    #[inline]
    fn sub(self, rhs: Coord) -> Self::Output {
        Coord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// One orthogonal step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Left,
    Right,
    Down,
}

/// The fixed order in which moves are tried.
pub const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Left,
    Direction::Right,
    Direction::Down,
];

impl Direction {
    #[inline]
    pub fn delta(self) -> Coord {
        match self {
            Direction::Up => Coord::new(0, -1),
            Direction::Left => Coord::new(-1, 0),
            Direction::Right => Coord::new(1, 0),
            Direction::Down => Coord::new(0, 1),
        }
    }

    /// Direction of the step `from -> to`.
    ///
    /// Anything that is not a right, left or down step reads as up.
    pub fn between(from: Coord, to: Coord) -> Direction {
        let d = to - from;
        [Direction::Right, Direction::Left, Direction::Down]
            .into_iter()
            .find(|dir| dir.delta() == d)
            .unwrap_or(Direction::Up)
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Down => "down",
        }
    }
}
