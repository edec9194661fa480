//! Rotations, reflections, and symmetry-orbit expansion.
//!
//! The board's 8 ring cells occupy the low 16 bits in ring order, so a
//! 45° rotation is a 16-bit rotate; the center cell never moves. Only
//! the horizontal reflection needs a direct permutation (a swap of the
//! outer row bytes in the case view); the other three axes are the
//! horizontal one conjugated by a rotation.
//!
//! Each board carries a pose tag recording which symmetries have been
//! applied to it since its canonical orientation: a 3-bit rotation step
//! count plus one mirror bit. [`Board::clear_pose`] undoes the recorded
//! transform, and [`expand_orbit`] uses the tag to enumerate a
//! template's full set of equivalent orientations.

use smallvec::SmallVec;

use super::state::{Board, POSE_MASK, POSE_SHIFT, RING_MASK};

/// Reflection axis, by the orientation of the mirror line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Mirror line through the middle row.
    Horizontal = 0,
    /// Mirror line along the bottom-left-to-top-right diagonal.
    Rising = 1,
    /// Mirror line through the middle column.
    Vertical = 2,
    /// Mirror line along the top-left-to-bottom-right diagonal.
    Falling = 3,
}

impl Axis {
    /// Decode a 2-bit value.
    #[must_use]
    pub fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0b00 => Axis::Horizontal,
            0b01 => Axis::Rising,
            0b10 => Axis::Vertical,
            _ => Axis::Falling,
        }
    }
}

/// One symmetry class a template can declare applicable.
///
/// The three rotation classes compose: any of the 8 ring rotations is a
/// sum of the enabled classes' step counts. Together with the mirror
/// they generate the dihedral group of the square.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symmetry {
    /// Toggle a 45° rotation (1 ring step).
    Rotate1,
    /// Toggle a 90° rotation (2 ring steps).
    Rotate2,
    /// Toggle a 180° rotation (4 ring steps).
    Rotate4,
    /// Toggle the reflection.
    Reflect,
}

impl Symmetry {
    /// All classes, in flag-bit order (bit 0 first).
    pub const ALL: [Symmetry; 4] = [
        Symmetry::Rotate1,
        Symmetry::Rotate2,
        Symmetry::Rotate4,
        Symmetry::Reflect,
    ];

    /// The flag bit in a template's symmetry nibble and in the pose tag.
    #[must_use]
    pub fn bit(self) -> u32 {
        match self {
            Symmetry::Rotate1 => 0b0001,
            Symmetry::Rotate2 => 0b0010,
            Symmetry::Rotate4 => 0b0100,
            Symmetry::Reflect => 0b1000,
        }
    }

    fn steps(self) -> i32 {
        match self {
            Symmetry::Rotate1 => 1,
            Symmetry::Rotate2 => 2,
            Symmetry::Rotate4 => 4,
            Symmetry::Reflect => 0,
        }
    }
}

impl Board {
    /// Rotate the 8 ring cells by `steps` positions (45° each).
    ///
    /// Negative steps normalize to the complementary positive rotation;
    /// the center cell is invariant. `rotate(8)` is the identity.
    pub fn rotate(&mut self, steps: i32) {
        let steps = steps.rem_euclid(8) as u32;
        let ring = (self.0 & RING_MASK) as u16;
        let ring = ring.rotate_left(steps * 2);
        self.0 = (self.0 & !RING_MASK) | u32::from(ring);
    }

    /// Reflect across the given axis.
    ///
    /// The horizontal reflection swaps the outer row bytes of the case
    /// view; the other axes are rotate(-k), horizontal, rotate(k) with
    /// k = 1 (rising), 2 (vertical), 3 (falling).
    pub fn reflect(&mut self, axis: Axis) {
        match axis {
            Axis::Horizontal => {
                let case = self.case();
                let swapped =
                    (case & 0x00FF00) | ((case & 0xFF0000) >> 16) | ((case & 0x0000FF) << 16);
                self.set_case(swapped);
            }
            other => {
                let k = other as i32;
                self.rotate(-k);
                self.reflect(Axis::Horizontal);
                self.rotate(k);
            }
        }
    }

    /// Rotation step count recorded in the pose tag.
    #[must_use]
    pub fn pose_steps(&self) -> u32 {
        self.pose() & 0b111
    }

    /// Whether the pose tag records a reflection.
    #[must_use]
    pub fn pose_mirrored(&self) -> bool {
        self.pose() & Symmetry::Reflect.bit() != 0
    }

    /// The axis the original horizontal mirror line currently lies on,
    /// given the recorded rotation.
    #[must_use]
    pub fn axis(&self) -> Axis {
        Axis::from_bits(self.pose_steps())
    }

    /// Whether one symmetry class is currently applied.
    #[must_use]
    pub fn has_symmetry(&self, symmetry: Symmetry) -> bool {
        self.pose() & symmetry.bit() != 0
    }

    /// Apply or undo one symmetry class, keeping the pose tag in sync.
    ///
    /// A no-op when the class is already in the requested state. The
    /// reflection reflects across [`Board::axis`], so that it composes
    /// correctly with whatever rotation is already applied.
    pub fn set_symmetry(&mut self, symmetry: Symmetry, on: bool) {
        if self.has_symmetry(symmetry) == on {
            return;
        }
        match symmetry {
            Symmetry::Reflect => {
                let axis = self.axis();
                self.reflect(axis);
            }
            rotation => {
                let steps = rotation.steps();
                self.rotate(if on { steps } else { -steps });
            }
        }
        self.0 ^= symmetry.bit() << POSE_SHIFT;
    }

    /// Undo every recorded symmetry, returning the board to the
    /// canonical orientation it was constructed from, and zero the pose
    /// tag.
    pub fn clear_pose(&mut self) {
        self.rotate(-(self.pose_steps() as i32));
        if self.pose_mirrored() {
            self.reflect(Axis::Horizontal);
        }
        self.0 &= !POSE_MASK;
    }
}

/// Expand a seed board into its symmetry orbit.
///
/// `flags` is the 4-bit applicable-symmetry mask (bit order per
/// [`Symmetry::ALL`]). The orbit is the power set of the active flags:
/// each subset yields one variant with exactly that subset of symmetry
/// classes inverted relative to the seed, so the result always has
/// exactly `2^popcount(flags)` elements and its membership depends only
/// on the flag set, not on application order.
#[must_use]
pub fn expand_orbit(seed: Board, flags: u32) -> SmallVec<[Board; 16]> {
    let active: SmallVec<[Symmetry; 4]> = Symmetry::ALL
        .iter()
        .copied()
        .filter(|s| flags & s.bit() != 0)
        .collect();

    let count = 1u32 << active.len();
    let mut orbit = SmallVec::with_capacity(count as usize);
    for subset in 0..count {
        let mut variant = seed;
        for (bit, &symmetry) in active.iter().enumerate() {
            if subset & (1 << bit) != 0 {
                variant.set_symmetry(symmetry, !seed.has_symmetry(symmetry));
            }
        }
        orbit.push(variant);
    }
    orbit
}
