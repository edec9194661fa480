//! Cell selection for the engine's side.
//!
//! The library is scanned in a fixed priority order: exact opening
//! continuations, then immediate threats (blocking the user's open
//! line before completing the engine's own), then fork situations, and
//! finally any empty cell at random. The first matching template wins;
//! ties between its candidate cells are broken with the game's RNG so
//! a seeded game replays identically.

use crate::board::{Board, Mark};
use crate::patterns::PatternLibrary;
use crate::rng::GameRng;

use super::find_match;

/// Picks the engine's next cell from the pattern library.
#[derive(Clone, Copy, Debug)]
pub struct ResponseEngine {
    library: &'static PatternLibrary,
}

impl Default for ResponseEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseEngine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            library: PatternLibrary::global(),
        }
    }

    /// Select a cell (1..=9) to mark on `board`.
    ///
    /// Returns `None` only when the board has no empty cell left.
    pub fn select(&self, board: &Board, rng: &mut GameRng) -> Option<usize> {
        let case = board.case();

        // Opening book: exact positions, compared under the full mask.
        let full_mask = &self.library.full_mask;
        for opening in &self.library.openings {
            if let Some(hit) = find_match(case, opening, full_mask) {
                return Self::pick(&hit, rng);
            }
        }

        // Immediate threats: block the user's open line first, then
        // complete the engine's own.
        for triple in &self.library.threats {
            if let Some(hit) = find_match(case, &triple.won, &triple.mask) {
                return Self::pick(&hit, rng);
            }
        }
        for triple in &self.library.threats {
            if let Some(hit) = find_match(case, &triple.lost, &triple.mask) {
                return Self::pick(&hit, rng);
            }
        }

        // Fork situations, same side order.
        for triple in &self.library.forks {
            if let Some(hit) = find_match(case, &triple.won, &triple.mask) {
                return Self::pick(&hit, rng);
            }
        }
        for triple in &self.library.forks {
            if let Some(hit) = find_match(case, &triple.lost, &triple.mask) {
                return Self::pick(&hit, rng);
            }
        }

        // No template applies: any empty cell.
        rng.choose(&board.cells_with(Mark::Empty)).copied()
    }

    fn pick(hit: &Board, rng: &mut GameRng) -> Option<usize> {
        rng.choose(&hit.cells_with(Mark::Target)).copied()
    }
}
