// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types.
//!
//! [`OracleError`] covers everything that aborts a divination or a table load.
//! `InvalidTotal`, `InvalidMask` and `GoverningLineSearchExhausted` are
//! defensive: they cannot occur while the casting and resolving code is
//! correct. `Consistency` means a caller passed a mask that is not
//! `primary XOR resulting`.
//!
//! A lookup miss is not an error. It is reported as [`NotFound`] and rendered
//! as a placeholder line.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort the current divination or table load.
#[derive(Debug, Error)]
pub enum OracleError {
    /// Three coin trials summed to something outside 6..=9.
    #[error("coin total {total} is outside 6..=9")]
    InvalidTotal { total: u8 },

    /// The change mask is not `primary XOR resulting`.
    #[error(
        "mask {mask:06b} is inconsistent with primary {primary:06b} and resulting {resulting:06b}"
    )]
    Consistency { primary: u8, resulting: u8, mask: u8 },

    /// A change mask with more changing lines than a hexagram has.
    #[error("{count} changing lines is not possible in a six-line figure")]
    InvalidMask { count: usize },

    /// The seven-step purification walk left the trigrams unequal.
    #[error("governing line search exhausted for {code:06b}")]
    GoverningLineSearchExhausted { code: u8 },

    /// A binary code string that is not 6 or 7 binary digits.
    #[error("invalid hexagram code {text:?}")]
    InvalidCode { text: String },

    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse config {}: {}", .path.display(), .source)]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl OracleError {
    /// True for the variants that indicate a logic defect rather than bad input.
    pub fn is_defensive(&self) -> bool {
        matches!(
            self,
            OracleError::InvalidTotal { .. }
                | OracleError::InvalidMask { .. }
                | OracleError::GoverningLineSearchExhausted { .. }
        )
    }
}

/// A lookup miss in one of the static tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFound {
    /// No hexagram record with this binary code.
    Code(String),
    /// No hexagram record with this name.
    Name(String),
    /// No pairing verdict for this (primary, resulting) name pair.
    Pairing { primary: String, resulting: String },
}

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFound::Code(code) => write!(f, "no hexagram with code {}", code),
            NotFound::Name(name) => write!(f, "no hexagram named {}", name),
            NotFound::Pairing { primary, resulting } => {
                write!(f, "no pairing verdict for {} → {}", primary, resulting)
            }
        }
    }
}

impl std::error::Error for NotFound {}
