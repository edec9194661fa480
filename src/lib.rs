//! # tictactoe-engine
//!
//! Decision engine for a 3×3 two-mark grid game that can act as the
//! autonomous responder for either side.
//!
//! ## Design Principles
//!
//! 1. **Packed value state**: one full game snapshot is a single `u32`
//!    (`Board`), copyable and comparable by value. Symmetry orbits are
//!    generated by transforming copies, never by cloning structures.
//!
//! 2. **Canonical patterns, expanded once**: every tactical template is
//!    authored in exactly one orientation and carries a symmetry-flag
//!    nibble. The `PatternLibrary` expands each template into its full
//!    orbit at first use and is immutable afterwards.
//!
//! 3. **Deterministic except the tie-break**: pattern matching and result
//!    detection are pure functions of the board. The only random step is
//!    the uniform draw among a matched template's candidate cells, and it
//!    goes through an injected, seeded [`GameRng`].
//!
//! ## Modules
//!
//! - `board`: the packed `Board` record, rotations, reflections, and
//!   orbit expansion
//! - `patterns`: the authored template tables and the expanded library
//! - `engine`: response selection and terminal-result detection
//! - `game`: the controller (turn sequencing, modes, scenes, events)
//! - `rng`: deterministic random number generation
//! - `error`: the error taxonomy
//!
//! ## Example
//!
//! ```
//! use tictactoe_engine::{Game, Mark, Mode};
//!
//! let mut game = Game::new(Mode::Attacker, 7);
//! game.apply_move(1).unwrap();
//!
//! // The engine answers an opening ring move by taking the center.
//! assert_eq!(game.cell(5), Ok(Mark::Cross));
//! assert_eq!(game.round(), 2);
//! ```

pub mod board;
pub mod engine;
pub mod error;
pub mod game;
pub mod patterns;
pub mod rng;

// Re-export commonly used types
pub use crate::board::{expand_orbit, Axis, Board, Mark, Mode, Outcome, Symmetry, Turn};
pub use crate::engine::{ResponseEngine, ResultEngine};
pub use crate::error::BoardError;
pub use crate::game::{Game, GameEvent, GameView, ModeRequest};
pub use crate::patterns::{PatternLibrary, PatternSet, TemplateTriple};
pub use crate::rng::{GameRng, GameRngState};
