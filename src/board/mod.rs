//! Packed board state and its symmetry transforms.

mod state;
mod symmetry;

pub use state::{Board, Mark, Mode, Outcome, Turn};
pub use symmetry::{expand_orbit, Axis, Symmetry};
