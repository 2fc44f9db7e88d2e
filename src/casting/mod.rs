// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Casting a hexagram.
//!
//! Two traditional methods are supported. They share one interface and both
//! end in `(primary, resulting, mask)`, but they are different procedures and
//! are kept apart:
//!
//! - [`CoinMethod`]: six three-coin tosses. Each line knows its value before
//!   and after the change, and the ruling line is resolved from the mask.
//! - [`SeededMethod`]: a polarity bit plus random bits, with the resulting
//!   hexagram found by a masked OR. Only a change count is drawn, and that
//!   count is the ruling line.
//!
//! # Example
//!
//! ```
//! use iching_oracle::casting::{CastingMethod, CoinMethod};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let cast = CoinMethod.cast(&mut rng).unwrap();
//! assert_eq!(cast.mask, cast.primary.diff(cast.resulting));
//! ```

pub mod coins;
pub mod seeded;
pub mod tally;

pub use coins::{toss_coins, CoinMethod, LineOutcome};
pub use seeded::{SeededDraw, SeededMethod};
pub use tally::LineTally;

use crate::errors::OracleError;
use crate::hexagram::constants::NLINES;
use crate::hexagram::{HexagramCode, Line, LineMask};
use crate::knowledge::KnowledgeBase;
use crate::ruling::{resolve_moving_line, MovingLine};
use rand::RngCore;
use std::fmt::Debug;

/// A method of casting a hexagram.
pub trait CastingMethod: Debug {
    /// Draw one cast.
    fn cast(&self, rng: &mut dyn RngCore) -> Result<Cast, OracleError>;

    /// Draw one cast with the hexagram records at hand.
    ///
    /// Default implementation ignores the records.
    fn cast_with_records(
        &self,
        rng: &mut dyn RngCore,
        _knowledge: &KnowledgeBase,
    ) -> Result<Cast, OracleError> {
        self.cast(rng)
    }

    /// Optional: a short name for logs and reports.
    ///
    /// Default implementation returns the type name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// How a cast was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastDetail {
    /// Six drawn lines, bottom first.
    Coins { lines: [Line; NLINES] },
    /// The intermediate values of a seeded cast.
    Seeded(SeededDraw),
}

/// The outcome of casting: primary and resulting hexagrams and the lines
/// that change between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cast {
    pub primary: HexagramCode,
    pub resulting: HexagramCode,
    pub mask: LineMask,
    pub detail: CastDetail,
}

impl Cast {
    /// Assemble a cast, checking that `mask == primary ^ resulting`.
    pub fn new(
        primary: HexagramCode,
        resulting: HexagramCode,
        mask: LineMask,
        detail: CastDetail,
    ) -> Result<Self, OracleError> {
        if primary.diff(resulting) != mask {
            return Err(OracleError::Consistency {
                primary: primary.bits(),
                resulting: resulting.bits(),
                mask: mask.bits(),
            });
        }
        Ok(Self {
            primary,
            resulting,
            mask,
            detail,
        })
    }

    /// The ruling line, by the rule of the method that drew this cast.
    pub fn ruling_line(&self) -> Result<MovingLine, OracleError> {
        match &self.detail {
            CastDetail::Coins { .. } => {
                resolve_moving_line(self.primary, self.resulting, self.mask)
            }
            CastDetail::Seeded(draw) => Ok(draw.moving_line()),
        }
    }
}
