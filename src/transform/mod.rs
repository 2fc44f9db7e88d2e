// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Transforms from a primary hexagram to its derived figures.
//!
//! ## Module Structure
//!
//! - `derived`: mutual, inverse and reversed hexagrams (includes the line
//!   selection tables)
//! - `mod`: Public API and re-exports

pub mod derived;

pub use derived::{inverse, mutual, reversed, DerivedHexagrams, MUTUAL, REVERSAL};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hexagram::constants::NLINES;

    #[test]
    fn test_selection_tables_in_range() {
        for &source in MUTUAL.iter().chain(REVERSAL.iter()) {
            assert!((source as usize) < NLINES);
        }
    }

    #[test]
    fn test_mutual_skips_outer_lines() {
        // Neither line 1 (bit 0) nor line 6 (bit 5) feeds the mutual hexagram.
        assert!(!MUTUAL.contains(&0));
        assert!(!MUTUAL.contains(&5));
    }
}
