// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Line tally
//!
//! Counts line outcomes over repeated tosses, to compare the observed
//! frequencies with the 1:3:3:1 odds of the coin method.

use crate::casting::LineOutcome;
use crate::errors::OracleError;
use rand::RngCore;
use strum::{EnumCount, IntoEnumIterator};

#[derive(Debug, Default, Clone)]
pub struct LineTally {
    counts: [u64; LineOutcome::COUNT],
}

impl LineTally {
    pub fn new() -> Self {
        LineTally::default()
    }

    /// Toss `trials` lines and count every outcome.
    pub fn run(trials: u64, rng: &mut dyn RngCore) -> Result<Self, OracleError> {
        let mut tally = Self::new();
        for _ in 0..trials {
            tally.record(LineOutcome::draw(rng)?);
        }
        Ok(tally)
    }

    /// Increment the counter for `outcome` by 1.
    pub fn record(&mut self, outcome: LineOutcome) {
        self.counts[outcome.index()] += 1;
    }

    /// Get the current value of the counter for `outcome`.
    pub fn get(&self, outcome: LineOutcome) -> u64 {
        self.counts[outcome.index()]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Observed frequency of `outcome`, or 0 before anything is recorded.
    pub fn frequency(&self, outcome: LineOutcome) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.get(outcome) as f64 / total as f64,
        }
    }

    /// Outcomes with their counts, in total order 6, 7, 8, 9.
    pub fn iter(&self) -> impl Iterator<Item = (LineOutcome, u64)> + '_ {
        LineOutcome::iter().map(move |outcome| (outcome, self.get(outcome)))
    }
}
