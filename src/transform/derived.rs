// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Derived hexagrams.
//!
//! The mutual and reversed hexagrams are both line selections: line i of the
//! result is copied from line `selection[i]` of the source, the same way a
//! permutation is applied to a sequence. The inverse flips every line.

use crate::hexagram::constants::{LINE_BITS, NLINES};
use crate::hexagram::{HexagramCode, SeedKey};

/// Reversal: the top line becomes the bottom line and vice versa.
pub const REVERSAL: [u8; NLINES] = [5, 4, 3, 2, 1, 0];

/// Mutual: lines 2-4 become the lower trigram, lines 3-5 the upper.
pub const MUTUAL: [u8; NLINES] = [1, 2, 3, 2, 3, 4];

/// Build a code whose bit i is bit `selection[i]` of `code`.
fn select_lines(code: HexagramCode, selection: &[u8; NLINES]) -> HexagramCode {
    let mut selected = 0u8;
    for (i, &source) in selection.iter().enumerate() {
        selected |= ((code.bits() >> source) & 1) << i;
    }
    HexagramCode::from_low_bits(selected)
}

/// The mutual (nuclear) hexagram, built from the four middle lines.
///
/// ```
/// use iching_oracle::hexagram::HexagramCode;
/// use iching_oracle::transform::mutual;
///
/// assert_eq!(mutual(HexagramCode::new(0b000011)).bits(), 1);
/// ```
pub fn mutual(code: HexagramCode) -> HexagramCode {
    select_lines(code, &MUTUAL)
}

/// The inverse ("error") hexagram: every line flipped.
pub fn inverse(code: HexagramCode) -> HexagramCode {
    HexagramCode::from_low_bits(code.bits() ^ LINE_BITS)
}

/// The reversed ("zong") hexagram: the figure turned upside down.
pub fn reversed(code: HexagramCode) -> HexagramCode {
    select_lines(code, &REVERSAL)
}

/// The three figures derived from one primary hexagram.
///
/// The three transforms are independent of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedHexagrams {
    pub mutual: HexagramCode,
    pub inverse: HexagramCode,
    pub reversed: HexagramCode,
}

impl DerivedHexagrams {
    pub fn of(code: HexagramCode) -> Self {
        Self {
            mutual: mutual(code),
            inverse: inverse(code),
            reversed: reversed(code),
        }
    }

    /// Derive from a seeded key. The key is normalized first, so the
    /// polarity bit never reaches the transforms.
    pub fn of_key(key: SeedKey) -> Self {
        Self::of(key.normalized().code())
    }

    /// The three codes in display order: mutual, inverse, reversed.
    pub fn codes(&self) -> [HexagramCode; 3] {
        [self.mutual, self.inverse, self.reversed]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hexagram::LineValue;

    /// The binary-string definition of the mutual hexagram, for comparison.
    fn mutual_by_string(code: HexagramCode) -> u8 {
        let s = code.to_string();
        let joined = format!("{}{}", &s[1..4], &s[2..5]);
        u8::from_str_radix(&joined, 2).unwrap()
    }

    #[test]
    fn test_mutual_example() {
        assert_eq!(mutual(HexagramCode::new(0b000011)).bits(), 0b000001);
    }

    #[test]
    fn test_mutual_matches_string_definition() {
        for code in HexagramCode::all() {
            assert_eq!(mutual(code).bits(), mutual_by_string(code), "code {}", code);
        }
    }

    #[test]
    fn test_mutual_of_pure_figures() {
        assert_eq!(mutual(HexagramCode::ALL_SOLID), HexagramCode::ALL_SOLID);
        assert_eq!(mutual(HexagramCode::ALL_BROKEN), HexagramCode::ALL_BROKEN);
    }

    #[test]
    fn test_mutual_is_not_injective() {
        // Lines 1 and 6 never reach the mutual hexagram.
        assert_eq!(
            mutual(HexagramCode::new(0b000000)),
            mutual(HexagramCode::new(0b100001))
        );
    }

    #[test]
    fn test_inverse() {
        assert_eq!(inverse(HexagramCode::ALL_SOLID), HexagramCode::ALL_BROKEN);
        assert_eq!(inverse(HexagramCode::ALL_BROKEN), HexagramCode::ALL_SOLID);
        assert_eq!(inverse(HexagramCode::new(0b101_010)).bits(), 0b010_101);
    }

    #[test]
    fn test_reversed() {
        assert_eq!(reversed(HexagramCode::ALL_SOLID), HexagramCode::ALL_SOLID);
        assert_eq!(reversed(HexagramCode::ALL_BROKEN), HexagramCode::ALL_BROKEN);
        assert_eq!(reversed(HexagramCode::new(0b000_001)).bits(), 0b100_000);
        assert_eq!(reversed(HexagramCode::new(0b000_011)).bits(), 0b110_000);
    }

    #[test]
    fn test_reversed_matches_string_reversal() {
        for code in HexagramCode::all() {
            let flipped: String = code.to_string().chars().rev().collect();
            assert_eq!(reversed(code).to_string(), flipped);
        }
    }

    #[test]
    fn test_involutions() {
        for code in HexagramCode::all() {
            assert_eq!(inverse(inverse(code)), code);
            assert_eq!(reversed(reversed(code)), code);
        }
    }

    #[test]
    fn test_reversal_table_is_a_reflection() {
        for (i, &source) in REVERSAL.iter().enumerate() {
            assert_eq!(source as usize, NLINES - 1 - i);
        }
    }

    #[test]
    fn test_derived_bundle() {
        let code = HexagramCode::new(0b000_011);
        let derived = DerivedHexagrams::of(code);
        assert_eq!(derived.mutual.bits(), 0b000_001);
        assert_eq!(derived.inverse.bits(), 0b111_100);
        assert_eq!(derived.reversed.bits(), 0b110_000);
        assert_eq!(
            derived.codes(),
            [derived.mutual, derived.inverse, derived.reversed]
        );
    }

    #[test]
    fn test_of_key_ignores_polarity() {
        let key = SeedKey::from_parts(LineValue::Broken, 0b111_100);
        // Normalizes to 0000011.
        assert_eq!(
            DerivedHexagrams::of_key(key),
            DerivedHexagrams::of(HexagramCode::new(0b000_011))
        );
    }
}
