// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The oracle: static tables plus one divination at a time.
//!
//! The Oracle separates two kinds of data:
//! - Immutable: the [`KnowledgeBase`], loaded once and only ever read
//! - Per divination: a [`Cast`] and everything derived from it, built fresh
//!   by [`Oracle::divine`] and dropped once rendered
//!
//! Nothing from one divination is kept for the next, so any number of
//! readings can borrow the same Oracle.
//!
//! ```text
//! method.cast_with_records(rng, knowledge) -> Cast
//!   -> ruling line (resolver, or the drawn count)
//!   -> governing line of each figure
//!   -> mutual / inverse / reversed
//!   -> records and pairing verdict
//! ```

use crate::casting::{Cast, CastingMethod};
use crate::errors::{NotFound, OracleError};
use crate::hexagram::{HexagramCode, LinePosition};
use crate::knowledge::{HexagramRecord, KnowledgeBase, Lookup, PairingRecord};
use crate::ruling::{resolve_governing_line, MovingLine};
use crate::transform::DerivedHexagrams;
use rand::RngCore;
use tracing::{debug, info};

/// One figure of a reading: its code, governing line and record.
#[derive(Debug, Clone)]
pub struct Figure<'a> {
    pub code: HexagramCode,
    pub governing: LinePosition,
    pub record: Lookup<'a, HexagramRecord>,
}

impl<'a> Figure<'a> {
    /// The record name, or the binary code when the record is missing.
    pub fn label(&self) -> String {
        match &self.record {
            Ok(record) => record.name.clone(),
            Err(_) => self.code.to_string(),
        }
    }
}

/// The three derived figures of a primary hexagram.
#[derive(Debug, Clone)]
pub struct DerivedFigures<'a> {
    pub codes: DerivedHexagrams,
    pub mutual: Figure<'a>,
    pub inverse: Figure<'a>,
    pub reversed: Figure<'a>,
}

/// The full result of one divination.
#[derive(Debug, Clone)]
pub struct Reading<'a> {
    pub method: String,
    pub cast: Cast,
    pub moving_line: MovingLine,
    pub primary: Figure<'a>,
    pub resulting: Figure<'a>,
    pub pairing: Lookup<'a, PairingRecord>,
    pub derived: DerivedFigures<'a>,
}

/// A single hexagram looked up by name, with its derived figures.
#[derive(Debug, Clone)]
pub struct Study<'a> {
    pub figure: Figure<'a>,
    pub derived: DerivedFigures<'a>,
}

/// A primary hexagram, a chosen line and a resulting hexagram.
#[derive(Debug, Clone)]
pub struct Comparison<'a> {
    pub primary: Figure<'a>,
    pub line: LinePosition,
    pub resulting: Figure<'a>,
    pub pairing: Lookup<'a, PairingRecord>,
    pub derived: DerivedFigures<'a>,
}

#[derive(Debug, Clone, Default)]
pub struct Oracle {
    knowledge: KnowledgeBase,
}

impl Oracle {
    pub fn new(knowledge: KnowledgeBase) -> Self {
        Self { knowledge }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Cast with `method` and read the result.
    pub fn divine(
        &self,
        method: &dyn CastingMethod,
        rng: &mut dyn RngCore,
    ) -> Result<Reading<'_>, OracleError> {
        let cast = method.cast_with_records(rng, &self.knowledge)?;
        info!(
            method = method.name(),
            primary = %cast.primary,
            resulting = %cast.resulting,
            mask = %cast.mask,
            "cast drawn"
        );
        self.read(method.name(), cast)
    }

    /// Read an existing cast.
    pub fn read(&self, method: &str, cast: Cast) -> Result<Reading<'_>, OracleError> {
        let moving_line = cast.ruling_line()?;
        let primary = self.figure(cast.primary)?;
        let resulting = self.figure(cast.resulting)?;
        let pairing = self.pairing(&primary, &resulting);
        let derived = self.derive(cast.primary)?;
        debug!(moving = moving_line.indicator(), "reading assembled");

        Ok(Reading {
            method: method.to_string(),
            cast,
            moving_line,
            primary,
            resulting,
            pairing,
            derived,
        })
    }

    /// Look up one figure and resolve its governing line.
    pub fn figure(&self, code: HexagramCode) -> Result<Figure<'_>, OracleError> {
        Ok(Figure {
            code,
            governing: resolve_governing_line(code)?,
            record: self.knowledge.lookup_hexagram(code),
        })
    }

    /// The mutual, inverse and reversed figures of `code`.
    pub fn derive(&self, code: HexagramCode) -> Result<DerivedFigures<'_>, OracleError> {
        let codes = DerivedHexagrams::of(code);
        Ok(DerivedFigures {
            codes,
            mutual: self.figure(codes.mutual)?,
            inverse: self.figure(codes.inverse)?,
            reversed: self.figure(codes.reversed)?,
        })
    }

    /// Study a hexagram by name.
    ///
    /// The outer result fails only on a defensive error; the inner one is a
    /// miss on the name or on a record without a code.
    pub fn study(&self, name: &str) -> Result<Result<Study<'_>, NotFound>, OracleError> {
        let code = match self.code_for_name(name) {
            Ok(code) => code,
            Err(miss) => return Ok(Err(miss)),
        };
        Ok(Ok(Study {
            figure: self.figure(code)?,
            derived: self.derive(code)?,
        }))
    }

    /// Compare a primary and a resulting hexagram, both by name, at one line.
    pub fn compare(
        &self,
        primary: &str,
        line: LinePosition,
        resulting: &str,
    ) -> Result<Result<Comparison<'_>, NotFound>, OracleError> {
        let (primary_code, resulting_code) =
            match (self.code_for_name(primary), self.code_for_name(resulting)) {
                (Ok(p), Ok(r)) => (p, r),
                (Err(miss), _) | (_, Err(miss)) => return Ok(Err(miss)),
            };
        let primary = self.figure(primary_code)?;
        let resulting = self.figure(resulting_code)?;
        let pairing = self.pairing(&primary, &resulting);
        Ok(Ok(Comparison {
            primary,
            line,
            resulting,
            pairing,
            derived: self.derive(primary_code)?,
        }))
    }

    fn code_for_name(&self, name: &str) -> Result<HexagramCode, NotFound> {
        let record = self.knowledge.lookup_by_name(name)?;
        record
            .code()
            .ok_or_else(|| NotFound::Code(format!("{} (record has no code)", record.name)))
    }

    /// Pairing verdict for two figures; a missing record is a missing pairing.
    fn pairing(&self, primary: &Figure<'_>, resulting: &Figure<'_>) -> Lookup<'_, PairingRecord> {
        match (&primary.record, &resulting.record) {
            (Ok(p), Ok(r)) => self.knowledge.lookup_pairing(&p.name, &r.name),
            _ => Err(NotFound::Pairing {
                primary: primary.label(),
                resulting: resulting.label(),
            }),
        }
    }
}
