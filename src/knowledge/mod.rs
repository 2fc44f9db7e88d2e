// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Read-only reference tables.
//!
//! - `records`: the record shapes of the hexagram and pairing tables
//! - `tables`: loading and linear-scan lookup

pub mod records;
pub mod tables;

pub use records::{HexagramRecord, PairingRecord};
pub use tables::{KnowledgeBase, Lookup};
