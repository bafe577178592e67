//! Step-exact route search for grid cleaning puzzles.
//!
//! Boys, girls and robots each walk a fixed number of steps without ever turning straight back.
//! Dirt is cleaned by anyone; pools, apples and bottles only by their own kind, and picked-up items
//! must end up next to the matching box. The solver looks for routes that leave the board clean.

pub mod board;
pub mod config;
pub mod core;
pub mod distance;
pub mod error;
pub mod puzzle;
pub mod render;
pub mod search;
pub mod solution;
