// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Line values and positions.
//!
//! Positions count from 1 at the bottom of the figure to 6 at the top.
//! Position p is stored in bit p-1 of a [`HexagramCode`](super::HexagramCode).

use crate::hexagram::constants::NLINES;
use std::fmt;

/// The value of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LineValue {
    /// Unbroken (yang) line, stored as bit 0.
    Solid = 0,
    /// Broken (yin) line, stored as bit 1.
    Broken = 1,
}

impl LineValue {
    pub fn from_bit(bit: u8) -> Self {
        if bit & 1 == 0 {
            LineValue::Solid
        } else {
            LineValue::Broken
        }
    }

    pub fn bit(self) -> u8 {
        self as u8
    }

    /// The opposite value.
    pub fn flipped(self) -> Self {
        match self {
            LineValue::Solid => LineValue::Broken,
            LineValue::Broken => LineValue::Solid,
        }
    }
}

impl fmt::Display for LineValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineValue::Solid => write!(f, "———"),
            LineValue::Broken => write!(f, "— —"),
        }
    }
}

/// A line position in the range 1..=NLINES.
///
/// Newtype wrapper so positions are never mixed up with bit indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LinePosition(u8);

impl LinePosition {
    /// The bottom line.
    pub const BOTTOM: LinePosition = LinePosition(1);

    /// The top line.
    pub const TOP: LinePosition = LinePosition(NLINES as u8);

    /// Create a new position, panicking if out of range.
    ///
    /// # Panics
    ///
    /// Panics if `value` is 0 or greater than NLINES.
    pub fn new(value: u8) -> Self {
        assert!(
            (1..=NLINES as u8).contains(&value),
            "Line position out of range: {}",
            value
        );
        Self(value)
    }

    /// Try to create a new position, returning None if out of range.
    pub fn try_new(value: u8) -> Option<Self> {
        if (1..=NLINES as u8).contains(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Position of the line stored in bit `index`.
    pub fn from_bit_index(index: u8) -> Self {
        Self::new(index + 1)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Bit index of this line within a code (position - 1).
    pub fn bit_index(self) -> u8 {
        self.0 - 1
    }

    /// Single-bit mask selecting this line.
    pub fn bit(self) -> u8 {
        1 << self.bit_index()
    }

    /// Zero-based index into per-line text arrays.
    pub fn as_index(self) -> usize {
        self.bit_index() as usize
    }

    /// All positions, bottom to top.
    pub fn all() -> impl Iterator<Item = LinePosition> {
        (1..=NLINES as u8).map(LinePosition)
    }
}

impl fmt::Display for LinePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A drawn line. Immutable once drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub position: LinePosition,
    pub value: LineValue,
    pub changing: bool,
}

impl Line {
    pub fn new(position: LinePosition, value: LineValue, changing: bool) -> Self {
        Self {
            position,
            value,
            changing,
        }
    }

    /// Value of this line in the resulting hexagram.
    pub fn changed_value(&self) -> LineValue {
        if self.changing {
            self.value.flipped()
        } else {
            self.value
        }
    }
}
