//! Error taxonomy.
//!
//! The engine has exactly one fatal precondition violation: addressing a
//! cell outside the board. Every other invalid request (occupied cell,
//! move after termination, unreachable mode transition) is a defined
//! silent no-op, so the state machine is total over its input domain.

use thiserror::Error;

/// Errors signalling caller misuse of the board API.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    /// A cell index outside `1..=9` was addressed.
    #[error("cell index {0} is outside the board (valid indices are 1..=9)")]
    InvalidIndex(usize),
}
