// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Hexagram types.
//!
//! This module contains type-safe representations of the figure itself:
//! - LineValue: Solid or broken
//! - LinePosition: 1..=6, bottom to top
//! - Line: A drawn line with its changing flag
//! - LineMask: Bitset of line positions (the change mask)
//! - HexagramCode: 6-bit encoding of a whole figure
//! - SeedKey: 7-bit polarity-prefixed encoding used by seeded casting

pub mod code;
pub mod constants;
pub mod line;
pub mod line_mask;

// Re-export for convenience
pub use code::{HexagramCode, SeedKey};
pub use constants::*;
pub use line::{Line, LinePosition, LineValue};
pub use line_mask::LineMask;
