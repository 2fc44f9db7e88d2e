// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Hexagram codes.
//!
//! [`HexagramCode`] is the canonical 6-bit encoding. [`SeedKey`] is the 7-bit
//! encoding used by the seeded casting method: a leading polarity bit followed
//! by the six line bits, always brought back to a leading 0 by
//! [`SeedKey::normalized`].
//!
//! Both render most-significant bit first, so the top line is the first
//! character and the bottom line the last:
//!
//! ```
//! use iching_oracle::hexagram::HexagramCode;
//!
//! let code: HexagramCode = "000011".parse().unwrap();
//! assert_eq!(code.bits(), 3);
//! assert_eq!(code.lower(), 0b011);
//! assert_eq!(code.upper(), 0b000);
//! assert_eq!(code.to_string(), "000011");
//! ```

use crate::errors::OracleError;
use crate::hexagram::constants::{
    LINE_BITS, NHEXAGRAMS, NLINES, NSEED_BITS, NTRIGRAM_LINES, POLARITY_BIT, SEED_BITS,
    TRIGRAM_BITS,
};
use crate::hexagram::{LineMask, LinePosition, LineValue};
use std::fmt;
use std::str::FromStr;

/// A hexagram as a 6-bit integer; bit i holds the value of line i+1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HexagramCode(u8);

impl HexagramCode {
    /// Six solid lines (the Creative).
    pub const ALL_SOLID: HexagramCode = HexagramCode(0);

    /// Six broken lines (the Receptive).
    pub const ALL_BROKEN: HexagramCode = HexagramCode(LINE_BITS);

    /// Create a code, panicking if it does not fit in six bits.
    ///
    /// # Panics
    ///
    /// Panics if `bits > 0b111111`.
    pub fn new(bits: u8) -> Self {
        assert!(bits <= LINE_BITS, "Hexagram code out of range: {}", bits);
        Self(bits)
    }

    /// Try to create a code, returning None if it does not fit in six bits.
    pub fn try_new(bits: u8) -> Option<Self> {
        if bits <= LINE_BITS {
            Some(Self(bits))
        } else {
            None
        }
    }

    /// Create a code from the low six bits of `bits`.
    pub const fn from_low_bits(bits: u8) -> Self {
        Self(bits & LINE_BITS)
    }

    /// Build a code from six line values, bottom line first.
    pub fn from_lines(values: &[LineValue; NLINES]) -> Self {
        let bits = values
            .iter()
            .enumerate()
            .fold(0u8, |acc, (i, value)| acc | (value.bit() << i));
        Self(bits)
    }

    /// Parse a binary string, most significant (top) line first.
    ///
    /// Six characters are read directly. Seven characters are read as a
    /// [`SeedKey`] and normalized first.
    pub fn parse(text: &str) -> Result<Self, OracleError> {
        let text = text.trim();
        match text.len() {
            NLINES => parse_bits(text).map(Self),
            NSEED_BITS => Ok(SeedKey::parse(text)?.normalized().code()),
            _ => Err(OracleError::InvalidCode {
                text: text.to_string(),
            }),
        }
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    /// Lower trigram (lines 1-3).
    pub fn lower(self) -> u8 {
        self.0 & TRIGRAM_BITS
    }

    /// Upper trigram (lines 4-6).
    pub fn upper(self) -> u8 {
        (self.0 >> NTRIGRAM_LINES) & TRIGRAM_BITS
    }

    /// Build a code from its two trigrams.
    pub fn from_trigrams(upper: u8, lower: u8) -> Self {
        Self(((upper & TRIGRAM_BITS) << NTRIGRAM_LINES) | (lower & TRIGRAM_BITS))
    }

    /// True when both trigrams are the same.
    pub fn is_pure(self) -> bool {
        self.lower() == self.upper()
    }

    pub fn line(self, position: LinePosition) -> LineValue {
        LineValue::from_bit(self.0 >> position.bit_index())
    }

    /// Flip every line selected by `mask`.
    pub fn flip(self, mask: LineMask) -> Self {
        Self(self.0 ^ mask.bits())
    }

    /// The lines that differ between two codes.
    pub fn diff(self, other: HexagramCode) -> LineMask {
        LineMask::from_bits(self.0 ^ other.0)
    }

    /// All 64 codes in ascending order.
    pub fn all() -> impl Iterator<Item = HexagramCode> {
        (0..NHEXAGRAMS as u8).map(HexagramCode)
    }
}

impl fmt::Display for HexagramCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06b}", self.0)
    }
}

impl FromStr for HexagramCode {
    type Err = OracleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A 7-bit seeded key: polarity bit followed by the six line bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeedKey(u8);

impl SeedKey {
    /// Combine a polarity with six line bits. The result is not normalized.
    pub fn from_parts(polarity: LineValue, lines: u8) -> Self {
        Self((polarity.bit() << NLINES) | (lines & LINE_BITS))
    }

    /// A normalized key for an existing code.
    pub fn from_code(code: HexagramCode) -> Self {
        Self(code.bits())
    }

    /// Create a key from the low seven bits of `bits`.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & SEED_BITS)
    }

    /// Parse exactly seven binary digits.
    pub fn parse(text: &str) -> Result<Self, OracleError> {
        let text = text.trim();
        if text.len() != NSEED_BITS {
            return Err(OracleError::InvalidCode {
                text: text.to_string(),
            });
        }
        parse_bits(text).map(Self)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn polarity(self) -> LineValue {
        LineValue::from_bit(self.0 >> NLINES)
    }

    pub fn is_normalized(self) -> bool {
        self.0 & POLARITY_BIT == 0
    }

    /// Flip all seven bits when the polarity bit is set.
    ///
    /// The result always has a leading 0.
    pub fn normalized(self) -> Self {
        if self.is_normalized() {
            self
        } else {
            Self(!self.0 & SEED_BITS)
        }
    }

    /// The six line bits.
    pub fn code(self) -> HexagramCode {
        HexagramCode::from_low_bits(self.0)
    }
}

impl fmt::Display for SeedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:07b}", self.0)
    }
}

fn parse_bits(text: &str) -> Result<u8, OracleError> {
    text.chars().try_fold(0u8, |acc, c| match c {
        '0' => Ok(acc << 1),
        '1' => Ok((acc << 1) | 1),
        _ => Err(OracleError::InvalidCode {
            text: text.to_string(),
        }),
    })
}
