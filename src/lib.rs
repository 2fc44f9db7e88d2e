// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! I-Ching hexagram casting, transformation and lookup.
//!
//! A hexagram is six lines, each solid (yang) or broken (yin), stored as a
//! 6-bit code with bit `i` holding line `i + 1`, counted from the bottom.
//!
//! # Architecture
//!
//! The crate uses a two-tier memory model:
//!
//! ## Tier 1: Knowledge base (Immutable)
//!
//! Loaded once before any divination:
//! - 64 hexagram records, keyed by code and by name
//! - 4096 pairing verdicts, keyed by (primary, resulting) name
//!
//! ## Tier 2: Reading (per divination)
//!
//! Built by [`Oracle::divine`] and dropped once rendered:
//! - the [`Cast`](casting::Cast): primary, resulting and change mask
//! - the ruling line and each figure's governing line
//! - the derived figures and their records
//!
//! # Pipeline
//!
//! 1. **Casting**: coins or a seeded draw give `(primary, resulting, mask)`
//! 2. **Ruling line**: one line chosen from all the changing lines
//! 3. **Governing line**: found by purifying the trigrams step by step
//! 4. **Transforms**: mutual, inverse and reversed figures
//! 5. **Lookup and report**: records fetched, misses shown as placeholders

pub mod casting;
pub mod config;
pub mod errors;
pub mod hexagram;
pub mod knowledge;
pub mod oracle;
pub mod report;
pub mod ruling;
pub mod transform;

pub use casting::{Cast, CastingMethod, CoinMethod, LineOutcome, SeededMethod};
pub use errors::{NotFound, OracleError};
pub use hexagram::{HexagramCode, LineMask, LinePosition, LineValue, SeedKey};
pub use knowledge::KnowledgeBase;
pub use oracle::{Oracle, Reading};
pub use ruling::{resolve_governing_line, resolve_moving_line, MovingLine};
pub use transform::{inverse, mutual, reversed, DerivedHexagrams};
