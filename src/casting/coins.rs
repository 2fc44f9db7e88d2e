// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The three-coin method.
//!
//! Each coin lands on its solid face (worth 3) or its broken face (worth 2).
//! Three coins sum to 6, 7, 8 or 9, and the total fixes both the line and
//! whether it changes:
//!
//! | total | line | changes to | odds |
//! |---|---|---|---|
//! | 6 | broken | solid | 1/8 |
//! | 7 | solid | | 3/8 |
//! | 8 | broken | | 3/8 |
//! | 9 | solid | broken | 1/8 |

use crate::casting::{Cast, CastDetail, CastingMethod};
use crate::errors::OracleError;
use crate::hexagram::constants::NLINES;
use crate::hexagram::{HexagramCode, Line, LineMask, LinePosition, LineValue};
use rand::{Rng, RngCore};
use strum_macros::{EnumCount as EnumCountMacro, EnumIter};
use tracing::debug;

/// Value of a coin landing on its solid face.
pub const SOLID_FACE: u8 = 3;

/// Value of a coin landing on its broken face.
pub const BROKEN_FACE: u8 = 2;

/// Number of coins per line.
pub const NCOINS: usize = 3;

/// The four outcomes of a three-coin toss, named by the traditional totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumCountMacro, EnumIter)]
#[repr(u8)]
pub enum LineOutcome {
    /// 6: broken, changing to solid.
    OldYin = 6,
    /// 7: solid, still.
    YoungYang = 7,
    /// 8: broken, still.
    YoungYin = 8,
    /// 9: solid, changing to broken.
    OldYang = 9,
}

impl LineOutcome {
    /// Map a coin total to its outcome.
    pub fn from_total(total: u8) -> Result<Self, OracleError> {
        match total {
            6 => Ok(LineOutcome::OldYin),
            7 => Ok(LineOutcome::YoungYang),
            8 => Ok(LineOutcome::YoungYin),
            9 => Ok(LineOutcome::OldYang),
            _ => Err(OracleError::InvalidTotal { total }),
        }
    }

    /// Toss three coins and interpret the total.
    pub fn draw(rng: &mut dyn RngCore) -> Result<Self, OracleError> {
        Self::from_total(toss_coins(rng))
    }

    pub fn total(self) -> u8 {
        self as u8
    }

    /// The value of the line as drawn.
    pub fn value(self) -> LineValue {
        match self {
            LineOutcome::OldYin | LineOutcome::YoungYin => LineValue::Broken,
            LineOutcome::YoungYang | LineOutcome::OldYang => LineValue::Solid,
        }
    }

    /// The value the line changes to, if it changes.
    pub fn changed_to(self) -> Option<LineValue> {
        match self {
            LineOutcome::OldYin => Some(LineValue::Solid),
            LineOutcome::OldYang => Some(LineValue::Broken),
            LineOutcome::YoungYang | LineOutcome::YoungYin => None,
        }
    }

    pub fn is_changing(self) -> bool {
        self.changed_to().is_some()
    }

    /// Probability of this outcome with fair coins.
    pub fn probability(self) -> f64 {
        if self.is_changing() {
            1.0 / 8.0
        } else {
            3.0 / 8.0
        }
    }

    /// Dense index 0..4, for counter arrays.
    pub fn index(self) -> usize {
        (self.total() - LineOutcome::OldYin.total()) as usize
    }

    pub fn line_at(self, position: LinePosition) -> Line {
        Line::new(position, self.value(), self.is_changing())
    }
}

/// Toss three fair coins and return their total.
pub fn toss_coins(rng: &mut dyn RngCore) -> u8 {
    (0..NCOINS)
        .map(|_| {
            if rng.gen_bool(0.5) {
                SOLID_FACE
            } else {
                BROKEN_FACE
            }
        })
        .sum()
}

/// Casting by six three-coin tosses, bottom line first.
///
/// Every line records where it came from and where it goes, so the resulting
/// hexagram is exact and the ruling line is resolved from the change mask.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoinMethod;

impl CoinMethod {
    /// Encode six drawn outcomes, bottom line first.
    pub fn encode(outcomes: &[LineOutcome; NLINES]) -> Result<Cast, OracleError> {
        let mut primary = 0u8;
        let mut resulting = 0u8;
        let mut mask = LineMask::empty();
        let mut lines = [Line::new(LinePosition::BOTTOM, LineValue::Solid, false); NLINES];

        let slots = outcomes.iter().zip(lines.iter_mut());
        for (position, (&outcome, line)) in LinePosition::all().zip(slots) {
            let value = outcome.value();
            let changed = outcome.changed_to().unwrap_or(value);

            primary |= value.bit() << position.bit_index();
            resulting |= changed.bit() << position.bit_index();
            if outcome.is_changing() {
                mask.insert(position);
            }
            *line = outcome.line_at(position);
        }

        Cast::new(
            HexagramCode::new(primary),
            HexagramCode::new(resulting),
            mask,
            CastDetail::Coins { lines },
        )
    }
}

impl CastingMethod for CoinMethod {
    fn cast(&self, rng: &mut dyn RngCore) -> Result<Cast, OracleError> {
        let mut outcomes = [LineOutcome::YoungYang; NLINES];
        for outcome in outcomes.iter_mut() {
            *outcome = LineOutcome::draw(rng)?;
        }
        debug!(totals = ?outcomes.map(LineOutcome::total), "coins tossed");
        Self::encode(&outcomes)
    }

    fn name(&self) -> &str {
        "coins"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use strum::IntoEnumIterator;

    #[test]
    fn test_from_total() {
        assert_eq!(LineOutcome::from_total(6).unwrap(), LineOutcome::OldYin);
        assert_eq!(LineOutcome::from_total(9).unwrap(), LineOutcome::OldYang);
        assert!(matches!(
            LineOutcome::from_total(5),
            Err(OracleError::InvalidTotal { total: 5 })
        ));
        assert!(LineOutcome::from_total(10).is_err());
    }

    #[test]
    fn test_outcome_table() {
        use LineValue::{Broken, Solid};
        let table = [
            (6, Broken, Some(Solid)),
            (7, Solid, None),
            (8, Broken, None),
            (9, Solid, Some(Broken)),
        ];
        for (total, value, changed_to) in table {
            let outcome = LineOutcome::from_total(total).unwrap();
            assert_eq!(outcome.value(), value);
            assert_eq!(outcome.changed_to(), changed_to);
            assert_eq!(outcome.is_changing(), changed_to.is_some());
            assert_eq!(outcome.total(), total);
        }
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let total: f64 = LineOutcome::iter().map(LineOutcome::probability).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_indices_are_dense() {
        let indices: Vec<usize> = LineOutcome::iter().map(LineOutcome::index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_toss_totals_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!((6..=9).contains(&toss_coins(&mut rng)));
        }
    }

    #[test]
    fn test_encode_known_outcomes() {
        use LineOutcome::*;
        // Bottom to top: 9, 7, 8, 6, 7, 8
        let cast = CoinMethod::encode(&[OldYang, YoungYang, YoungYin, OldYin, YoungYang, YoungYin])
            .unwrap();
        assert_eq!(cast.primary.bits(), 0b101_100);
        assert_eq!(cast.resulting.bits(), 0b100_101);
        assert_eq!(cast.mask.bits(), 0b001_001);

        let CastDetail::Coins { lines } = cast.detail else {
            panic!("coin cast without lines");
        };
        assert_eq!(lines[0].position.value(), 1);
        assert!(lines[0].changing);
        assert_eq!(lines[3].value, LineValue::Broken);
        assert_eq!(lines[3].changed_value(), LineValue::Solid);
        assert!(!lines[5].changing);
    }

    #[test]
    fn test_cast_keeps_mask_invariant() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let cast = CoinMethod.cast(&mut rng).unwrap();
            assert_eq!(cast.mask, cast.primary.diff(cast.resulting));
        }
    }

    #[test]
    fn test_cast_is_reproducible() {
        let a = CoinMethod.cast(&mut StdRng::seed_from_u64(3)).unwrap();
        let b = CoinMethod.cast(&mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(a.primary, b.primary);
        assert_eq!(a.resulting, b.resulting);
    }
}
