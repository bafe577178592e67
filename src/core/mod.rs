//! Low-level, allocation-free primitives.
//!
//! - [`coord`]: zero-based board coordinates and the four step directions.
//! - [`cell`]: cell kinds and cells packed into a single `u16` index of the padded board.
//! - [`agent`]: agent kinds and the per-agent walking state.

pub mod agent;
pub mod cell;
pub mod coord;
