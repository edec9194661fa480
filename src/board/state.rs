//! Packed board state: one `u32` holding a full game snapshot.
//!
//! ## Layout
//!
//! | bits   | field                                             |
//! |--------|---------------------------------------------------|
//! | 0..16  | the 8 ring cells, 2 bits each, in ring order      |
//! | 16..20 | pose tag (3-bit rotation count + 1 mirror bit)    |
//! | 20..24 | round counter, 0..=9                              |
//! | 24..26 | center cell (position 5)                          |
//! | 26..28 | outcome                                           |
//! | 28..30 | turn                                              |
//! | 30..32 | mode                                              |
//!
//! The ring cells sit in the low 16 bits in ring order (7, 8, 9, 6, 3,
//! 2, 1, 4), so rotating the board 45° is one 16-bit rotate. The center
//! never moves and lives outside the ring field.
//!
//! The **case** is the derived packed view of all 9 cells used for
//! pattern comparison: three row bytes, row 1 highest, with cells 3/6/9
//! in the low pair of each byte. It is computed from and decomposed into
//! the cell fields, never stored on its own.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::BoardError;

/// Bit shift of each cell (positions 1..=9) inside the packed record.
const CELL_SHIFT: [u32; 9] = [12, 10, 8, 14, 24, 6, 0, 2, 4];

/// Bit shift of each cell (positions 1..=9) inside the case view.
const CASE_SHIFT: [u32; 9] = [20, 18, 16, 12, 10, 8, 4, 2, 0];

const CELL_BITS: u32 = 0b11;

pub(crate) const RING_MASK: u32 = 0x0000_FFFF;
pub(crate) const POSE_SHIFT: u32 = 16;
pub(crate) const POSE_MASK: u32 = 0xF << POSE_SHIFT;

const ROUND_SHIFT: u32 = 20;
const ROUND_BITS: u32 = 0xF;
const OUTCOME_SHIFT: u32 = 26;
const TURN_SHIFT: u32 = 28;
const MODE_SHIFT: u32 = 30;

/// One cell value.
///
/// `Target` only ever appears inside pattern templates: it marks a cell
/// that is a candidate response position. A live game board never holds
/// it; [`Board::sanitized`] strips it before result comparisons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// Unoccupied cell.
    Empty,
    /// The responding side's mark.
    Cross,
    /// The user's mark.
    Nought,
    /// Template-only wildcard: candidate response cell.
    Target,
}

impl Mark {
    /// Decode a 2-bit field value.
    #[must_use]
    pub fn from_bits(bits: u32) -> Self {
        match bits & CELL_BITS {
            0b00 => Mark::Empty,
            0b01 => Mark::Cross,
            0b10 => Mark::Nought,
            _ => Mark::Target,
        }
    }

    /// The 2-bit field value.
    #[must_use]
    pub fn bits(self) -> u32 {
        self as u32
    }

    fn glyph(self) -> char {
        match self {
            Mark::Empty => '_',
            Mark::Cross => 'X',
            Mark::Nought => 'O',
            Mark::Target => '+',
        }
    }
}

/// Stored game mode: side × debug.
///
/// The low bit selects the side (set = user defends, the engine moves
/// first), the high bit selects debug (no automatic response).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// User moves first, engine responds.
    Attacker,
    /// Engine moves first, user responds.
    Defender,
    /// Attacker board without automatic responses.
    DebugAttacker,
    /// Defender board without automatic responses.
    DebugDefender,
}

impl Mode {
    const SIDE: u32 = 0b01;
    const DEBUG: u32 = 0b10;

    /// Decode a 2-bit field value.
    #[must_use]
    pub fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0b00 => Mode::Attacker,
            0b01 => Mode::Defender,
            0b10 => Mode::DebugAttacker,
            _ => Mode::DebugDefender,
        }
    }

    /// The 2-bit field value.
    #[must_use]
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// True when the user plays the defending side.
    #[must_use]
    pub fn defender_side(self) -> bool {
        self.bits() & Self::SIDE != 0
    }

    /// True when automatic responses are disabled.
    #[must_use]
    pub fn debug(self) -> bool {
        self.bits() & Self::DEBUG != 0
    }

    /// The mode with the side bit complemented, debug preserved.
    #[must_use]
    pub fn conjugated(self) -> Self {
        Self::from_bits((self.bits() & Self::DEBUG) | (!self.bits() & Self::SIDE))
    }

    /// The mode with the debug bit complemented, side preserved.
    #[must_use]
    pub fn configured(self) -> Self {
        Self::from_bits((self.bits() & Self::SIDE) | (!self.bits() & Self::DEBUG))
    }
}

/// Whose placement is expected next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    /// Sentinel for a freshly zeroed record; resolved from the mode's
    /// side bit on construction.
    Unspecified,
    /// The user places next.
    User,
    /// The responding engine places next.
    Response,
    /// No further placements are accepted.
    Terminated,
}

impl Turn {
    #[must_use]
    pub fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0b00 => Turn::Unspecified,
            0b01 => Turn::User,
            0b10 => Turn::Response,
            _ => Turn::Terminated,
        }
    }

    #[must_use]
    pub fn bits(self) -> u32 {
        self as u32
    }
}

/// Terminal result, from the user's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The game continues.
    Open,
    /// The user completed a line.
    Won,
    /// The engine completed a line.
    Lost,
    /// Nine rounds elapsed without a line.
    Tied,
}

impl Outcome {
    #[must_use]
    pub fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0b00 => Outcome::Open,
            0b01 => Outcome::Won,
            0b10 => Outcome::Lost,
            _ => Outcome::Tied,
        }
    }

    #[must_use]
    pub fn bits(self) -> u32 {
        self as u32
    }
}

/// Packed game snapshot.
///
/// A plain value type: field setters enforce masks and shifts but no
/// game rules. Turn sequencing, round counting, and result freezing are
/// the controller's job.
///
/// ## Example
///
/// ```
/// use tictactoe_engine::{Board, Mark, Mode};
///
/// let mut board = Board::new(Mode::Attacker);
/// board.set_cell(5, Mark::Nought).unwrap();
/// assert_eq!(board.cell(5), Ok(Mark::Nought));
/// assert!(board.cell(10).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board(pub(crate) u32);

impl Board {
    /// Create an empty board under the given mode, with the turn
    /// resolved from the mode's side bit.
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        let mut board = Board(0);
        board.set_turn(if mode.defender_side() {
            Turn::Response
        } else {
            Turn::User
        });
        board.set_mode(mode);
        board
    }

    /// Create a board from a packed case view. All non-cell fields are
    /// zero; bits outside the cell boxes are ignored.
    #[must_use]
    pub fn from_case(case: u32) -> Self {
        let mut board = Board(0);
        board.set_case(case);
        board
    }

    // === Cells ===

    /// Get the mark at `index` (1..=9).
    pub fn cell(&self, index: usize) -> Result<Mark, BoardError> {
        if !(1..=9).contains(&index) {
            return Err(BoardError::InvalidIndex(index));
        }
        Ok(self.mark_at(index))
    }

    /// Set the mark at `index` (1..=9).
    pub fn set_cell(&mut self, index: usize, mark: Mark) -> Result<(), BoardError> {
        if !(1..=9).contains(&index) {
            return Err(BoardError::InvalidIndex(index));
        }
        self.put(index, mark);
        Ok(())
    }

    /// All 1-based positions currently holding `mark`.
    #[must_use]
    pub fn cells_with(&self, mark: Mark) -> SmallVec<[usize; 9]> {
        (1..=9).filter(|&i| self.mark_at(i) == mark).collect()
    }

    /// A copy with every `Target` cell replaced by `Empty`.
    ///
    /// Applied to templates before equality comparison against a live
    /// board, since `Target` never appears in live play.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let mut board = *self;
        for i in 1..=9 {
            if board.mark_at(i) == Mark::Target {
                board.put(i, Mark::Empty);
            }
        }
        board
    }

    fn mark_at(&self, index: usize) -> Mark {
        Mark::from_bits((self.0 >> CELL_SHIFT[index - 1]) & CELL_BITS)
    }

    /// Write a cell without bounds checking. `index` must be 1..=9.
    pub(crate) fn put(&mut self, index: usize, mark: Mark) {
        let shift = CELL_SHIFT[index - 1];
        self.0 = (self.0 & !(CELL_BITS << shift)) | (mark.bits() << shift);
    }

    // === Case view ===

    /// The packed view of all 9 cells, for single-comparison matching.
    #[must_use]
    pub fn case(&self) -> u32 {
        let mut case = 0;
        for i in 0..9 {
            case |= ((self.0 >> CELL_SHIFT[i]) & CELL_BITS) << CASE_SHIFT[i];
        }
        case
    }

    /// Replace all 9 cells from a packed case view.
    pub fn set_case(&mut self, case: u32) {
        for i in 0..9 {
            let bits = (case >> CASE_SHIFT[i]) & CELL_BITS;
            self.0 = (self.0 & !(CELL_BITS << CELL_SHIFT[i])) | (bits << CELL_SHIFT[i]);
        }
    }

    // === Scalar fields ===

    #[must_use]
    pub fn mode(&self) -> Mode {
        Mode::from_bits(self.0 >> MODE_SHIFT)
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.0 = (self.0 & !(0b11 << MODE_SHIFT)) | (mode.bits() << MODE_SHIFT);
    }

    #[must_use]
    pub fn turn(&self) -> Turn {
        Turn::from_bits(self.0 >> TURN_SHIFT)
    }

    pub fn set_turn(&mut self, turn: Turn) {
        self.0 = (self.0 & !(0b11 << TURN_SHIFT)) | (turn.bits() << TURN_SHIFT);
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        Outcome::from_bits(self.0 >> OUTCOME_SHIFT)
    }

    pub fn set_outcome(&mut self, outcome: Outcome) {
        self.0 = (self.0 & !(0b11 << OUTCOME_SHIFT)) | (outcome.bits() << OUTCOME_SHIFT);
    }

    /// Number of placed marks, 0..=9.
    #[must_use]
    pub fn round(&self) -> u8 {
        ((self.0 >> ROUND_SHIFT) & ROUND_BITS) as u8
    }

    pub fn set_round(&mut self, round: u8) {
        self.0 = (self.0 & !(ROUND_BITS << ROUND_SHIFT)) | ((u32::from(round) & ROUND_BITS) << ROUND_SHIFT);
    }

    /// The raw pose nibble (rotation count + mirror bit).
    #[must_use]
    pub fn pose(&self) -> u32 {
        (self.0 & POSE_MASK) >> POSE_SHIFT
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Board<{:?}, {:?}, {:?}>{{{}}} [ ",
            self.mode(),
            self.turn(),
            self.outcome(),
            self.round()
        )?;
        for i in 1..=9 {
            write!(f, "{}", self.mark_at(i).glyph())?;
            if i == 3 || i == 6 {
                write!(f, ", ")?;
            }
        }
        write!(f, " ] (0b{:04b})", self.pose())
    }
}
