//! The authored tactical templates and the expanded pattern library.
//!
//! Every template is a `u32` in case layout (three row bytes, row 1
//! highest) with a 4-bit applicable-symmetry nibble at bits 24..28.
//! Cell boxes inside a template code mean:
//!
//! - `0b00`: must be empty on the live board
//! - `0b01`: don't care (excluded from the comparison mask)
//! - `0b10`: owned by the line holder
//! - `0b11`: candidate response cell (`Mark::Target`)
//!
//! A [`TemplateTriple`] derives three concrete pattern sets from one
//! code: **won** keeps the owned cells as the user's mark, **lost**
//! turns them into the engine's mark, and **mask** selects every cell
//! the comparison must consider. Each set is expanded into its full
//! symmetry orbit once, at first use of the library, and shared
//! read-only afterwards.

use std::sync::OnceLock;

use smallvec::SmallVec;

use crate::board::{expand_orbit, Board};

/// The nine cell boxes of the case layout.
const CELLS: u32 = 0x003F_3F3F;
/// The applicable-symmetry nibble.
const FLAGS: u32 = 0x0F00_0000;

/// Completed-line templates: the middle row/column and diagonals
/// (rotate-1 + rotate-2), and the four border lines (rotate-2 +
/// rotate-4). Used for result detection.
const LINE_CODES: [u32; 2] = [
    0b0011_00011001_00011001_00011001,
    0b0110_00100101_00100101_00100101,
];

/// One-gap line templates: two owned cells plus a single candidate on
/// the same line. Center-line and border-line families, with the gap in
/// the middle of the line or at its end.
const THREAT_CODES: [u32; 4] = [
    0b0011_00011001_00011101_00011001,
    0b0111_00011001_00011001_00011101,
    0b0110_00100101_00110101_00100101,
    0b1110_00100101_00100101_00110101,
];

/// Two-gap tactical templates (fork building and fork blocking). These
/// pin most cells exactly, including cells that must still be empty.
const FORK_CODES: [u32; 8] = [
    0b1110_00010111_00011010_00000100,
    0b1110_00010111_00011000_00000110,
    0b1110_00010111_00010010_00100100,
    0b1110_00010111_00010000_00100110,
    0b0110_00001011_00010110_00010100,
    0b0110_00100011_00010110_00010100,
    0b0110_00001011_00010100_00010110,
    0b0110_00100011_00010100_00010110,
];

/// Exact opening continuations: the empty board (respond corner or
/// center), the center already taken (respond corner), and a lone ring
/// mark (respond center).
const OPENING_CODES: [u32; 3] = [
    0b0000_00110011_00001100_00110011,
    0b0000_00110011_00001000_00110011,
    0b0111_00001000_00001100_00000000,
];

/// Mask matching every cell, paired with the opening templates.
const FULL_MASK_CODE: u32 = 0b1111_00111111_00111111_00111111;

/// One authored template code plus its pre-expanded symmetry orbit.
#[derive(Clone, Debug)]
pub struct PatternSet {
    code: u32,
    boards: SmallVec<[Board; 16]>,
}

impl PatternSet {
    fn new(code: u32) -> Self {
        let code = code & (CELLS | FLAGS);
        let seed = Board::from_case(code & CELLS);
        let boards = expand_orbit(seed, (code & FLAGS) >> 24);
        Self { code, boards }
    }

    /// The authored code (cells + symmetry nibble).
    #[must_use]
    pub fn code(&self) -> u32 {
        self.code
    }

    /// Every concrete orientation of this template.
    #[must_use]
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }
}

/// Won/Lost/Mask pattern sets derived from one template code.
#[derive(Clone, Debug)]
pub struct TemplateTriple {
    /// Owned cells as the user's mark: matches the user's line.
    pub won: PatternSet,
    /// Owned cells as the engine's mark: matches the engine's line.
    pub lost: PatternSet,
    /// Cells the comparison must consider (don't-cares excluded).
    pub mask: PatternSet,
}

impl TemplateTriple {
    fn new(code: u32) -> Self {
        Self {
            won: PatternSet::new(remap(code, |b| if b == 0b01 { 0b00 } else { b })),
            lost: PatternSet::new(remap(code, |b| match b {
                0b01 => 0b00,
                0b10 => 0b01,
                other => other,
            })),
            mask: PatternSet::new(remap(code, |b| if b == 0b01 { 0b00 } else { 0b11 })),
        }
    }
}

/// Apply a 2-bit-box transform to every cell box of a template code,
/// preserving the symmetry nibble.
fn remap(code: u32, f: impl Fn(u32) -> u32) -> u32 {
    let mut cells = 0;
    for i in 0..11 {
        cells |= f((code >> (2 * i)) & 0b11) << (2 * i);
    }
    (cells & CELLS) | (code & FLAGS)
}

/// The fixed, priority-ordered tactical pattern library.
///
/// Built once per process behind [`PatternLibrary::global`]; the orbit
/// arrays are immutable afterwards and safe to share across games and
/// concurrent tests without locking.
#[derive(Debug)]
pub struct PatternLibrary {
    /// Completed lines, for result detection.
    pub lines: Vec<TemplateTriple>,
    /// One-gap lines: immediate win/loss threats.
    pub threats: Vec<TemplateTriple>,
    /// Two-gap tactical situations.
    pub forks: Vec<TemplateTriple>,
    /// Exact opening continuations.
    pub openings: Vec<PatternSet>,
    /// The all-cells mask used with `openings`.
    pub full_mask: PatternSet,
}

impl PatternLibrary {
    fn build() -> Self {
        Self {
            lines: LINE_CODES.iter().map(|&c| TemplateTriple::new(c)).collect(),
            threats: THREAT_CODES.iter().map(|&c| TemplateTriple::new(c)).collect(),
            forks: FORK_CODES.iter().map(|&c| TemplateTriple::new(c)).collect(),
            openings: OPENING_CODES.iter().map(|&c| PatternSet::new(c)).collect(),
            full_mask: PatternSet::new(FULL_MASK_CODE),
        }
    }

    /// The process-wide library, built on first access.
    #[must_use]
    pub fn global() -> &'static PatternLibrary {
        static LIBRARY: OnceLock<PatternLibrary> = OnceLock::new();
        LIBRARY.get_or_init(Self::build)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Mark;

    #[test]
    fn test_library_group_sizes() {
        let library = PatternLibrary::global();
        assert_eq!(library.lines.len(), 2);
        assert_eq!(library.threats.len(), 4);
        assert_eq!(library.forks.len(), 8);
        assert_eq!(library.openings.len(), 3);

        // The symmetry nibble survives every remapping.
        assert_eq!(library.lines[0].won.code() & FLAGS, 0b0011 << 24);
        assert_eq!(library.lines[0].mask.code() & FLAGS, 0b0011 << 24);
        assert_eq!(library.full_mask.code() & FLAGS, 0b1111 << 24);
    }

    #[test]
    fn test_orbit_sizes_follow_symmetry_nibbles() {
        let library = PatternLibrary::global();

        assert_eq!(library.lines[0].won.boards().len(), 4); // 0b0011
        assert_eq!(library.lines[1].won.boards().len(), 4); // 0b0110
        assert_eq!(library.threats[1].won.boards().len(), 8); // 0b0111
        assert_eq!(library.threats[3].won.boards().len(), 8); // 0b1110
        assert_eq!(library.openings[0].boards().len(), 1); // 0b0000
        assert_eq!(library.openings[2].boards().len(), 8); // 0b0111
        assert_eq!(library.full_mask.boards().len(), 16); // 0b1111
    }

    #[test]
    fn test_triple_sets_share_orbit_length() {
        for triple in &PatternLibrary::global().threats {
            assert_eq!(triple.won.boards().len(), triple.lost.boards().len());
            assert_eq!(triple.won.boards().len(), triple.mask.boards().len());
        }
    }

    #[test]
    fn test_line_remap_marks() {
        // The center-line template owns the middle column.
        let triple = &PatternLibrary::global().lines[0];
        let won = triple.won.boards()[0];
        let lost = triple.lost.boards()[0];
        let mask = triple.mask.boards()[0];

        assert_eq!(won.cells_with(Mark::Nought).as_slice(), &[2, 5, 8]);
        assert_eq!(lost.cells_with(Mark::Cross).as_slice(), &[2, 5, 8]);
        // Don't-care side columns are excluded from the mask.
        assert_eq!(mask.cells_with(Mark::Target).as_slice(), &[2, 5, 8]);
        assert_eq!(mask.cells_with(Mark::Empty).len(), 6);
    }

    #[test]
    fn test_threat_template_has_single_target() {
        for triple in &PatternLibrary::global().threats {
            for board in triple.won.boards() {
                assert_eq!(board.cells_with(Mark::Target).len(), 1);
                assert_eq!(board.cells_with(Mark::Nought).len(), 2);
            }
            for board in triple.lost.boards() {
                assert_eq!(board.cells_with(Mark::Target).len(), 1);
                assert_eq!(board.cells_with(Mark::Cross).len(), 2);
            }
        }
    }

    #[test]
    fn test_line_orbits_cover_all_eight_lines() {
        // Between them the two completed-line templates describe all 8
        // winning lines of the grid.
        let library = PatternLibrary::global();
        let mut lines: Vec<Vec<usize>> = Vec::new();
        for triple in &library.lines {
            for board in triple.won.boards() {
                let mut cells: Vec<usize> = board.cells_with(Mark::Nought).into_vec();
                cells.sort_unstable();
                lines.push(cells);
            }
        }
        lines.sort();
        lines.dedup();

        let mut expected = vec![
            vec![1, 2, 3],
            vec![4, 5, 6],
            vec![7, 8, 9],
            vec![1, 4, 7],
            vec![2, 5, 8],
            vec![3, 6, 9],
            vec![1, 5, 9],
            vec![3, 5, 7],
        ];
        expected.sort();
        assert_eq!(lines, expected);
    }

    #[test]
    fn test_full_mask_considers_every_cell() {
        for board in PatternLibrary::global().full_mask.boards() {
            assert_eq!(board.cells_with(Mark::Target).len(), 9);
        }
    }

    #[test]
    fn test_opening_templates() {
        let library = PatternLibrary::global();

        // Empty board: corners and center are candidates.
        let first = library.openings[0].boards()[0];
        assert_eq!(first.cells_with(Mark::Target).as_slice(), &[1, 3, 5, 7, 9]);
        assert_eq!(first.cells_with(Mark::Empty).as_slice(), &[2, 4, 6, 8]);

        // Center taken by the user: corners are candidates.
        let second = library.openings[1].boards()[0];
        assert_eq!(second.cells_with(Mark::Nought).as_slice(), &[5]);
        assert_eq!(second.cells_with(Mark::Target).as_slice(), &[1, 3, 7, 9]);

        // A lone ring mark: the center is the single candidate, in
        // every orientation.
        for board in library.openings[2].boards() {
            assert_eq!(board.cells_with(Mark::Target).as_slice(), &[5]);
            assert_eq!(board.cells_with(Mark::Nought).len(), 1);
        }
    }
}
