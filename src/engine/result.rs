//! Position classification.

use crate::board::{Board, Outcome};
use crate::patterns::PatternLibrary;

use super::find_match;

/// Classifies a position as won, lost, tied or still open.
///
/// A position is `Won` when the user has completed a line, `Lost` when
/// the engine has, and `Tied` when all nine cells are marked with no
/// line on either side. Ordering does not matter for legal play, since
/// placement stops at the first completed line.
#[derive(Clone, Copy, Debug)]
pub struct ResultEngine {
    library: &'static PatternLibrary,
}

impl Default for ResultEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultEngine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            library: PatternLibrary::global(),
        }
    }

    /// Evaluate `board` against the completed-line templates.
    #[must_use]
    pub fn evaluate(&self, board: &Board) -> Outcome {
        let case = board.case();

        for triple in &self.library.lines {
            if find_match(case, &triple.won, &triple.mask).is_some() {
                return Outcome::Won;
            }
        }
        for triple in &self.library.lines {
            if find_match(case, &triple.lost, &triple.mask).is_some() {
                return Outcome::Lost;
            }
        }
        if board.round() == 9 {
            return Outcome::Tied;
        }
        Outcome::Open
    }
}
