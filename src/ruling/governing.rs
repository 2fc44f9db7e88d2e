// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Governing (world) line search.
//!
//! A figure whose two trigrams are equal is pure, and its governing line is the
//! top line. Any other figure is walked through [`PURIFICATION_STEPS`]: each
//! step flips the listed positions of a working copy, cumulatively, and the
//! first step that leaves the copy pure names the governing line as the
//! highest position it flipped.
//!
//! The cumulative flips after each step give the trigram differences
//! 001, 011, 111, 110, 100, 101, 010: every non-zero difference exactly once,
//! so the walk always ends within seven steps.

use crate::errors::OracleError;
use crate::hexagram::{HexagramCode, LineMask, LinePosition};
use tracing::debug;

/// The seven purification steps, as line positions flipped per step.
pub const PURIFICATION_STEPS: [&[u8]; 7] = [&[1], &[2], &[3], &[4], &[5], &[4], &[1, 2, 3]];

/// One step of the walk: the lines it flips and the highest of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurificationStep {
    pub flips: LineMask,
    pub highest: u8,
}

impl PurificationStep {
    /// Build a step from its line positions. An empty group fails to compile
    /// where it is used in a constant.
    const fn from_lines(lines: &[u8]) -> Self {
        assert!(!lines.is_empty(), "purification step flips no line");
        let mut bits = 0u8;
        let mut highest = 0u8;
        let mut i = 0;
        while i < lines.len() {
            bits |= 1 << (lines[i] - 1);
            if lines[i] > highest {
                highest = lines[i];
            }
            i += 1;
        }
        Self {
            flips: LineMask::from_bits(bits),
            highest,
        }
    }
}

/// [`PURIFICATION_STEPS`] as masks, computed at compile time.
pub const STEPS: [PurificationStep; 7] = {
    let mut steps = [PurificationStep {
        flips: LineMask::empty(),
        highest: 0,
    }; 7];
    let mut i = 0;
    while i < steps.len() {
        steps[i] = PurificationStep::from_lines(PURIFICATION_STEPS[i]);
        i += 1;
    }
    steps
};

/// Find the governing line of `code`.
///
/// ```
/// use iching_oracle::hexagram::HexagramCode;
/// use iching_oracle::ruling::resolve_governing_line;
///
/// // Pure figures are governed by the top line.
/// assert_eq!(resolve_governing_line(HexagramCode::new(0b010_010)).unwrap().value(), 6);
/// // One step: flipping line 1 makes 000 001 pure.
/// assert_eq!(resolve_governing_line(HexagramCode::new(0b000_001)).unwrap().value(), 1);
/// ```
pub fn resolve_governing_line(code: HexagramCode) -> Result<LinePosition, OracleError> {
    if code.is_pure() {
        return Ok(LinePosition::TOP);
    }

    let mut working = code;
    for (index, step) in STEPS.iter().enumerate() {
        working = working.flip(step.flips);
        if working.is_pure() {
            let governing = LinePosition::new(step.highest);
            debug!(
                code = %code,
                step = index + 1,
                line = governing.value(),
                "governing line found"
            );
            return Ok(governing);
        }
    }

    Err(OracleError::GoverningLineSearchExhausted { code: code.bits() })
}
