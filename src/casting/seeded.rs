// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The seeded (7-bit) method.
//!
//! The primary hexagram is six random bits behind a polarity bit taken from
//! the enquirer (0 for a man, 1 for a woman), normalized so the polarity bit
//! reads 0. The resulting hexagram is not drawn line by line. Instead:
//!
//! 1. draw a change count n from one up to the number of line texts the
//!    primary record carries (seven for the two pure figures, six for the
//!    rest), or up to `max_moving` when there is no record,
//! 2. build a right-justified mask of n one-bits,
//! 3. AND it with a fresh 7-bit random draw,
//! 4. OR that onto the primary key and normalize again.
//!
//! Only the count is known up front; which lines actually change, and into
//! what, is only known after the OR and renormalization. The drawn count is
//! itself read as the ruling line.

use crate::casting::{Cast, CastDetail, CastingMethod};
use crate::errors::OracleError;
use crate::hexagram::constants::{LINE_BITS, NLINES, NSEED_BITS, SEED_BITS};
use crate::hexagram::{HexagramCode, LinePosition, LineValue, SeedKey};
use crate::knowledge::KnowledgeBase;
use crate::ruling::MovingLine;
use rand::{Rng, RngCore};
use tracing::debug;

/// Every intermediate value of a seeded cast, kept for the detailed report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededDraw {
    /// Polarity bit plus six random bits, before normalization.
    pub seed: SeedKey,
    /// The normalized primary key.
    pub primary_key: SeedKey,
    /// Number of lines drawn to change.
    pub moving_count: u8,
    /// Right-justified mask of `moving_count` one-bits.
    pub count_mask: SeedKey,
    /// Fresh 7-bit random draw.
    pub random_bits: SeedKey,
    /// `count_mask & random_bits`.
    pub actual_mask: SeedKey,
    /// `primary_key | actual_mask`, before normalization.
    pub combined: SeedKey,
    /// The normalized resulting key.
    pub resulting_key: SeedKey,
}

impl SeededDraw {
    /// Run the masked-OR steps from an already drawn primary seed.
    pub fn compute(seed: SeedKey, moving_count: u8, random_bits: u8) -> Self {
        let primary_key = seed.normalized();
        let count_mask = SeedKey::from_bits(right_justified_ones(moving_count));
        let random_bits = SeedKey::from_bits(random_bits);
        let actual_mask = SeedKey::from_bits(count_mask.bits() & random_bits.bits());
        let combined = SeedKey::from_bits(primary_key.bits() | actual_mask.bits());
        Self {
            seed,
            primary_key,
            moving_count,
            count_mask,
            random_bits,
            actual_mask,
            combined,
            resulting_key: combined.normalized(),
        }
    }

    /// The drawn count read as a ruling line. A count of seven reaches the
    /// polarity bit and is read as the special seventh line.
    pub fn moving_line(&self) -> MovingLine {
        match self.moving_count {
            0 => MovingLine::None,
            n => LinePosition::try_new(n)
                .map(MovingLine::Line)
                .unwrap_or(MovingLine::Governing),
        }
    }
}

/// `n` one-bits, right-justified within the seven seeded bits.
fn right_justified_ones(n: u8) -> u8 {
    if n as usize >= NSEED_BITS {
        SEED_BITS
    } else {
        (1u8 << n) - 1
    }
}

/// Casting from a polarity bit and masked random draws.
#[derive(Debug, Clone, Copy)]
pub struct SeededMethod {
    polarity: LineValue,
    max_moving: u8,
}

impl SeededMethod {
    /// A seeded method drawing between one and six changes.
    pub fn new(polarity: LineValue) -> Self {
        Self {
            polarity,
            max_moving: NLINES as u8,
        }
    }

    /// Allow up to `max_moving` changes when the primary has no record,
    /// clamped to `1..=7`.
    pub fn with_max_moving(mut self, max_moving: u8) -> Self {
        self.max_moving = max_moving.clamp(1, NSEED_BITS as u8);
        self
    }

    pub fn polarity(&self) -> LineValue {
        self.polarity
    }

    pub fn max_moving(&self) -> u8 {
        self.max_moving
    }
}

impl SeededMethod {
    /// Cast with the change count bounded by `line_texts(primary)`, falling
    /// back to `max_moving`.
    fn cast_bounded(
        &self,
        rng: &mut dyn RngCore,
        line_texts: impl FnOnce(HexagramCode) -> Option<usize>,
    ) -> Result<Cast, OracleError> {
        let seed = SeedKey::from_parts(self.polarity, rng.gen::<u8>() & LINE_BITS);
        let bound = match line_texts(seed.normalized().code()) {
            Some(n) if n > 0 => n.min(NSEED_BITS) as u8,
            _ => self.max_moving,
        };
        let moving_count = rng.gen_range(1..=bound);
        let random_bits = rng.gen::<u8>() & SEED_BITS;

        let draw = SeededDraw::compute(seed, moving_count, random_bits);
        debug!(
            seed = %draw.seed,
            primary = %draw.primary_key,
            count = draw.moving_count,
            actual = %draw.actual_mask,
            resulting = %draw.resulting_key,
            "seeded cast"
        );

        let primary = draw.primary_key.code();
        let resulting = draw.resulting_key.code();
        Cast::new(
            primary,
            resulting,
            primary.diff(resulting),
            CastDetail::Seeded(draw),
        )
    }
}

impl CastingMethod for SeededMethod {
    fn cast(&self, rng: &mut dyn RngCore) -> Result<Cast, OracleError> {
        self.cast_bounded(rng, |_| None)
    }

    fn cast_with_records(
        &self,
        rng: &mut dyn RngCore,
        knowledge: &KnowledgeBase,
    ) -> Result<Cast, OracleError> {
        self.cast_bounded(rng, |primary| {
            knowledge
                .lookup_hexagram(primary)
                .ok()
                .map(|record| record.line_texts.len())
        })
    }

    fn name(&self) -> &str {
        "seeded"
    }
}
