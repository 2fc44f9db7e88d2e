// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The two static lookup tables.
//!
//! Both are plain vectors scanned linearly: 64 and 4096 entries are small
//! enough that an index buys nothing. A miss is a [`NotFound`], never an
//! error.

use crate::errors::{NotFound, OracleError};
use crate::hexagram::constants::{NHEXAGRAMS, NLINES, NPAIRINGS, NSEED_BITS};
use crate::hexagram::{HexagramCode, SeedKey};
use crate::knowledge::{HexagramRecord, PairingRecord};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, info, warn};

/// Result of a table lookup.
pub type Lookup<'a, T> = Result<&'a T, NotFound>;

/// The hexagram and pairing tables, immutable once built.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    hexagrams: Vec<HexagramRecord>,
    pairings: Vec<PairingRecord>,
}

impl KnowledgeBase {
    /// Build from in-memory tables.
    ///
    /// Tables of unexpected size are accepted; lookups simply miss.
    pub fn new(hexagrams: Vec<HexagramRecord>, pairings: Vec<PairingRecord>) -> Self {
        if hexagrams.len() != NHEXAGRAMS {
            warn!(
                count = hexagrams.len(),
                expected = NHEXAGRAMS,
                "hexagram table has an unexpected size"
            );
        }
        if pairings.len() != NPAIRINGS {
            warn!(
                count = pairings.len(),
                expected = NPAIRINGS,
                "pairing table has an unexpected size"
            );
        }
        Self {
            hexagrams,
            pairings,
        }
    }

    /// Load both tables from JSON files holding arrays of records.
    ///
    /// Only the hexagram table is required. A pairing table that cannot be
    /// read or parsed is logged and replaced by an empty one, so every
    /// pairing lookup misses.
    pub fn load(hexagram_path: &Path, pairing_path: &Path) -> Result<Self, OracleError> {
        let hexagrams: Vec<HexagramRecord> = load_table(hexagram_path)?;
        let pairings: Vec<PairingRecord> = match load_table(pairing_path) {
            Ok(pairings) => pairings,
            Err(err) => {
                warn!(%err, "pairing table not loaded, verdicts will be missing");
                Vec::new()
            }
        };
        info!(
            hexagrams = hexagrams.len(),
            pairings = pairings.len(),
            "knowledge base loaded"
        );
        Ok(Self::new(hexagrams, pairings))
    }

    pub fn hexagrams(&self) -> &[HexagramRecord] {
        &self.hexagrams
    }

    pub fn pairings(&self) -> &[PairingRecord] {
        &self.pairings
    }

    /// Find the record for a code.
    ///
    /// Matches the 6-bit key, or the 7-bit key for tables that carry only
    /// seeded keys.
    pub fn lookup_hexagram(&self, code: HexagramCode) -> Lookup<'_, HexagramRecord> {
        let bits6 = code.to_string();
        let bits7 = SeedKey::from_code(code).to_string();
        self.hexagrams
            .iter()
            .find(|h| h.bits6.as_deref() == Some(bits6.as_str()))
            .or_else(|| {
                self.hexagrams
                    .iter()
                    .find(|h| h.bits7.as_deref() == Some(bits7.as_str()))
            })
            .ok_or_else(|| miss(NotFound::Code(bits6)))
    }

    /// Find a record by exact binary string: six digits against the 6-bit
    /// key, seven digits against the 7-bit key.
    pub fn lookup_binary(&self, bits: &str) -> Lookup<'_, HexagramRecord> {
        let bits = bits.trim();
        let found = match bits.len() {
            NLINES => self
                .hexagrams
                .iter()
                .find(|h| h.bits6.as_deref() == Some(bits)),
            NSEED_BITS => self
                .hexagrams
                .iter()
                .find(|h| h.bits7.as_deref() == Some(bits)),
            _ => None,
        };
        found.ok_or_else(|| miss(NotFound::Code(bits.to_string())))
    }

    /// Find a record by name, ignoring surrounding whitespace.
    pub fn lookup_by_name(&self, name: &str) -> Lookup<'_, HexagramRecord> {
        let name = name.trim();
        self.hexagrams
            .iter()
            .find(|h| h.name == name)
            .ok_or_else(|| miss(NotFound::Name(name.to_string())))
    }

    /// Find the verdict for an ordered (primary, resulting) name pair.
    pub fn lookup_pairing(&self, primary: &str, resulting: &str) -> Lookup<'_, PairingRecord> {
        self.pairings
            .iter()
            .find(|p| p.primary == primary && p.resulting == resulting)
            .ok_or_else(|| {
                miss(NotFound::Pairing {
                    primary: primary.to_string(),
                    resulting: resulting.to_string(),
                })
            })
    }
}

fn miss(not_found: NotFound) -> NotFound {
    debug!(%not_found, "lookup miss");
    not_found
}

fn load_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, OracleError> {
    let content = std::fs::read_to_string(path).map_err(|source| OracleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| OracleError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
