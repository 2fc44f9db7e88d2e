// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Compile-time constants for hexagram encoding.
//!
//! A hexagram is six lines stacked bottom to top. Each line is stored as one
//! bit of a small integer, bit 0 being the bottom line:
//!
//! ```text
//! bit:   5 4 3 | 2 1 0
//! line:  6 5 4 | 3 2 1
//!        upper | lower
//! ```
//!
//! A clear bit is a solid (yang) line, a set bit a broken (yin) line.
//! The seeded casting method prefixes a seventh, polarity bit.

/// Number of lines in a hexagram.
pub const NLINES: usize = 6;

/// Number of lines in a trigram (half a hexagram).
pub const NTRIGRAM_LINES: usize = NLINES / 2;

/// Number of distinct hexagrams (2^NLINES).
pub const NHEXAGRAMS: usize = 1 << NLINES;

/// Number of ordered (primary, resulting) hexagram pairs.
///
/// For NLINES=6 this is 64 × 64 = 4096 pairing verdicts.
pub const NPAIRINGS: usize = NHEXAGRAMS * NHEXAGRAMS;

/// All six line bits set.
pub const LINE_BITS: u8 = (1 << NLINES) - 1;

/// All three trigram bits set.
pub const TRIGRAM_BITS: u8 = (1 << NTRIGRAM_LINES) - 1;

/// Width of a seeded key: one polarity bit plus the six line bits.
pub const NSEED_BITS: usize = NLINES + 1;

/// All seven seeded-key bits set.
pub const SEED_BITS: u8 = (1 << NSEED_BITS) - 1;

/// The leading polarity bit of a seeded key.
pub const POLARITY_BIT: u8 = 1 << NLINES;

/// Compute factorial at compile time.
const fn factorial(n: usize) -> usize {
    match n {
        0 | 1 => 1,
        _ => n * factorial(n - 1),
    }
}

/// Compute binomial coefficient (n choose k) at compile time.
///
/// `choose(NLINES, k)` is the number of change masks with exactly k
/// changing lines.
pub const fn choose(n: usize, k: usize) -> usize {
    if k > n {
        0
    } else if k == 0 || k == n {
        1
    } else {
        factorial(n) / (factorial(k) * factorial(n - k))
    }
}

/// Number of pure hexagrams (upper trigram equals lower trigram).
pub const NPURE_HEXAGRAMS: usize = 1 << NTRIGRAM_LINES;

/// The polarity bit and the line bits must fit in one byte.
const _: () = assert!(NSEED_BITS <= 8, "seeded key must fit in a u8");
