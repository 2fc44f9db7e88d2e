// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! LineMask type for representing sets of line positions as bitsets.
//!
//! A LineMask is the change mask of a cast: bit i is set when line i+1 is
//! changing. It is always equal to `primary XOR resulting`.
//!
//! # Examples
//!
//! ```
//! use iching_oracle::hexagram::{LineMask, LinePosition};
//!
//! let mut mask = LineMask::empty();
//! mask.insert(LinePosition::new(1));
//! mask.insert(LinePosition::new(4));
//!
//! assert_eq!(mask.len(), 2);
//! assert_eq!(mask.bits(), 0b001001);
//! assert_eq!(format!("{}", mask), "001001");
//!
//! let positions: Vec<u8> = mask.iter().map(|p| p.value()).collect();
//! assert_eq!(positions, vec![1, 4]);
//! ```

use crate::hexagram::constants::{LINE_BITS, NLINES};
use crate::hexagram::LinePosition;
use std::fmt;

/// A set of line positions represented as a 6-bit bitset.
///
/// Bit i (counting from LSB) is set if position i+1 is in the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LineMask(u8);

impl LineMask {
    /// Create an empty mask (no changing lines).
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Create a mask containing all six positions.
    pub const fn full() -> Self {
        Self(LINE_BITS)
    }

    /// Create a mask from a raw bit value, discarding bits above the six lines.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & LINE_BITS)
    }

    /// Create a mask from a slice of positions.
    pub fn from_positions(positions: &[LinePosition]) -> Self {
        let mut mask = Self::empty();
        for &position in positions {
            mask.insert(position);
        }
        mask
    }

    pub fn contains(self, position: LinePosition) -> bool {
        self.0 & position.bit() != 0
    }

    pub fn insert(&mut self, position: LinePosition) {
        self.0 |= position.bit();
    }

    pub fn remove(&mut self, position: LinePosition) {
        self.0 &= !position.bit();
    }

    /// Number of changing lines (population count).
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    /// Positions not in this mask (the still lines).
    pub fn complement(self) -> Self {
        Self(!self.0 & LINE_BITS)
    }

    /// Iterate over all positions in the mask.
    ///
    /// Positions are yielded in ascending order (bottom line first).
    pub fn iter(self) -> impl Iterator<Item = LinePosition> {
        LineMaskIter {
            bits: self.0,
            index: 0,
        }
    }
}

/// Iterator over positions in a LineMask.
struct LineMaskIter {
    bits: u8,
    index: u8,
}

impl Iterator for LineMaskIter {
    type Item = LinePosition;

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < NLINES as u8 {
            let idx = self.index;
            self.index += 1;

            if (self.bits >> idx) & 1 != 0 {
                return Some(LinePosition::from_bit_index(idx));
            }
        }
        None
    }
}

impl fmt::Display for LineMask {
    /// Format as six binary digits, top line first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06b}", self.0)
    }
}

impl From<&[LinePosition]> for LineMask {
    fn from(positions: &[LinePosition]) -> Self {
        Self::from_positions(positions)
    }
}
