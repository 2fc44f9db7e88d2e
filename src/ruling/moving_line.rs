// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Ruling (moving) line resolution.
//!
//! When several lines change at once, a single one is read as the ruling line.
//! The rule depends only on how many lines change, so the mask is first
//! classified into a [`ChangePattern`] with one variant per count, and each
//! variant carries exactly the positions its rule needs:
//!
//! | changing | rule |
//! |---|---|
//! | 0 | no ruling line |
//! | 1 | the changing line |
//! | 2 | the one that becomes broken; if both become the same, the upper |
//! | 3 | the middle one |
//! | 4 | the lower of the two still lines |
//! | 5 | the single still line |
//! | 6 | the seventh reading for the Creative and the Receptive, else the governing line |

use crate::errors::OracleError;
use crate::hexagram::{HexagramCode, LineMask, LinePosition, LineValue};
use crate::ruling::resolve_governing_line;
use std::fmt;
use tracing::debug;

/// The ruling line of a cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovingLine {
    /// No line changes.
    None,
    /// A single authoritative line.
    Line(LinePosition),
    /// All six lines of the Creative or the Receptive change.
    Governing,
}

impl MovingLine {
    /// Numeric indicator: 0 for none, 1..=6 for a line, 7 for the special case.
    pub fn indicator(self) -> u8 {
        match self {
            MovingLine::None => 0,
            MovingLine::Line(position) => position.value(),
            MovingLine::Governing => 7,
        }
    }

    pub fn from_indicator(indicator: u8) -> Option<Self> {
        match indicator {
            0 => Some(MovingLine::None),
            7 => Some(MovingLine::Governing),
            n => LinePosition::try_new(n).map(MovingLine::Line),
        }
    }

    pub fn position(self) -> Option<LinePosition> {
        match self {
            MovingLine::Line(position) => Some(position),
            _ => None,
        }
    }
}

impl fmt::Display for MovingLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.indicator())
    }
}

/// A change mask classified by its number of changing lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangePattern {
    Still,
    Single(LinePosition),
    /// Two changing lines, ascending.
    Pair(LinePosition, LinePosition),
    /// Three changing lines, ascending.
    Triple([LinePosition; 3]),
    /// Four changing lines; carries the two still lines, ascending.
    Quad { still: [LinePosition; 2] },
    /// Five changing lines; carries the still line.
    Quint { still: LinePosition },
    All,
}

impl ChangePattern {
    /// Classify a change mask.
    pub fn of(mask: LineMask) -> Result<Self, OracleError> {
        let changing: Vec<LinePosition> = mask.iter().collect();
        let still: Vec<LinePosition> = mask.complement().iter().collect();

        let pattern = match changing.len() {
            0 => ChangePattern::Still,
            1 => ChangePattern::Single(changing[0]),
            2 => ChangePattern::Pair(changing[0], changing[1]),
            3 => ChangePattern::Triple([changing[0], changing[1], changing[2]]),
            4 => ChangePattern::Quad {
                still: [still[0], still[1]],
            },
            5 => ChangePattern::Quint { still: still[0] },
            6 => ChangePattern::All,
            count => return Err(OracleError::InvalidMask { count }),
        };
        Ok(pattern)
    }

    /// Number of changing lines.
    pub fn count(&self) -> usize {
        match self {
            ChangePattern::Still => 0,
            ChangePattern::Single(_) => 1,
            ChangePattern::Pair(..) => 2,
            ChangePattern::Triple(_) => 3,
            ChangePattern::Quad { .. } => 4,
            ChangePattern::Quint { .. } => 5,
            ChangePattern::All => 6,
        }
    }

    /// Apply the rule for this pattern.
    ///
    /// `resulting` decides the two-line case, `primary` the six-line case.
    pub fn resolve(
        self,
        primary: HexagramCode,
        resulting: HexagramCode,
    ) -> Result<MovingLine, OracleError> {
        let line = match self {
            ChangePattern::Still => return Ok(MovingLine::None),
            ChangePattern::Single(position) => position,
            ChangePattern::Pair(lower, upper) => {
                match (resulting.line(lower), resulting.line(upper)) {
                    (LineValue::Broken, LineValue::Solid) => lower,
                    (LineValue::Solid, LineValue::Broken) => upper,
                    _ => upper,
                }
            }
            ChangePattern::Triple([_, middle, _]) => middle,
            ChangePattern::Quad { still } => still[0],
            ChangePattern::Quint { still } => still,
            ChangePattern::All => {
                if primary == HexagramCode::ALL_SOLID || primary == HexagramCode::ALL_BROKEN {
                    return Ok(MovingLine::Governing);
                }
                resolve_governing_line(primary)?
            }
        };
        Ok(MovingLine::Line(line))
    }
}

/// Resolve the ruling line of a cast.
///
/// Fails with [`OracleError::Consistency`] unless `mask == primary ^ resulting`.
///
/// ```
/// use iching_oracle::hexagram::{HexagramCode, LineMask};
/// use iching_oracle::ruling::{resolve_moving_line, MovingLine};
///
/// let (solid, broken) = (HexagramCode::ALL_SOLID, HexagramCode::ALL_BROKEN);
/// let still = resolve_moving_line(solid, solid, LineMask::empty());
/// assert_eq!(still.unwrap(), MovingLine::None);
///
/// let all = resolve_moving_line(solid, broken, LineMask::full());
/// assert_eq!(all.unwrap().indicator(), 7);
/// ```
pub fn resolve_moving_line(
    primary: HexagramCode,
    resulting: HexagramCode,
    mask: LineMask,
) -> Result<MovingLine, OracleError> {
    if primary.diff(resulting) != mask {
        return Err(OracleError::Consistency {
            primary: primary.bits(),
            resulting: resulting.bits(),
            mask: mask.bits(),
        });
    }

    let pattern = ChangePattern::of(mask)?;
    let moving = pattern.resolve(primary, resulting)?;
    debug!(
        primary = %primary,
        resulting = %resulting,
        changing = pattern.count(),
        moving = moving.indicator(),
        "ruling line resolved"
    );
    Ok(moving)
}
