// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Line resolution.
//!
//! - `moving_line`: collapses the changing lines of a cast into one ruling line
//! - `governing`: the trigram purification walk, used on its own and as the
//!   fallback when all six lines change

pub mod governing;
pub mod moving_line;

pub use governing::{resolve_governing_line, PurificationStep, PURIFICATION_STEPS, STEPS};
pub use moving_line::{resolve_moving_line, ChangePattern, MovingLine};
