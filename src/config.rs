// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Configuration for the oracle binary.
//!
//! Read from TOML. Every field has a default, so an empty file (or no file)
//! gives a working configuration.

use crate::errors::OracleError;
use crate::hexagram::constants::NLINES;
use crate::report::ReportOptions;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// Looked for in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "oracle.toml";

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Static table locations
    #[serde(default)]
    pub data: DataConfig,

    /// Report output
    #[serde(default)]
    pub output: OutputConfig,

    /// Default casting method
    #[serde(default)]
    pub cast: CastConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// The 64 hexagram records
    #[serde(default = "default_hexagrams")]
    pub hexagrams: PathBuf,

    /// The 4096 pairing verdicts
    #[serde(default = "default_pairings")]
    pub pairings: PathBuf,

    /// Prompt fragments placed at the top of a saved reading
    #[serde(default = "default_prompts")]
    pub prompts: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            hexagrams: default_hexagrams(),
            pairings: default_pairings(),
            prompts: default_prompts(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for saved readings
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Hide binary codes and the arithmetic of the cast
    #[serde(default = "default_true")]
    pub simplified: bool,

    /// Show the ruling line in each derived figure
    #[serde(default)]
    pub derived_details: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            simplified: true,
            derived_details: false,
        }
    }
}

impl OutputConfig {
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            simplified: self.simplified,
            derived_details: self.derived_details,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastConfig {
    #[serde(default)]
    pub method: MethodKind,

    /// Seeded change count bound when the primary has no record, 1..=7
    #[serde(default = "default_max_moving")]
    pub max_moving: u8,
}

impl Default for CastConfig {
    fn default() -> Self {
        Self {
            method: MethodKind::default(),
            max_moving: default_max_moving(),
        }
    }
}

/// The two casting methods, by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    #[default]
    Coins,
    Seeded,
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodKind::Coins => write!(f, "coins"),
            MethodKind::Seeded => write!(f, "seeded"),
        }
    }
}

impl FromStr for MethodKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coins" => Ok(MethodKind::Coins),
            "seeded" => Ok(MethodKind::Seeded),
            other => Err(format!("unknown casting method '{}' (expected coins or seeded)", other)),
        }
    }
}

// Default value helpers
fn default_true() -> bool {
    true
}

fn default_hexagrams() -> PathBuf {
    PathBuf::from("assets/64_Gua_Data.json")
}

fn default_pairings() -> PathBuf {
    PathBuf::from("assets/64_Gua_Data_4096.json")
}

fn default_prompts() -> PathBuf {
    PathBuf::from("assets/prompt.txt")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_max_moving() -> u8 {
    NLINES as u8
}

impl OracleConfig {
    /// Parse configuration text. `path` is only used for error reports.
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, OracleError> {
        toml::from_str(content).map_err(|source| OracleError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from a file, which must exist and parse.
    pub fn load(path: &Path) -> Result<Self, OracleError> {
        let content = std::fs::read_to_string(path).map_err(|source| OracleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content, path)?;
        info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Resolve the configuration: an explicit path, else
    /// [`DEFAULT_CONFIG_FILE`] if present, else defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, OracleError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            return Self::load(fallback);
        }
        debug!("no configuration file, using defaults");
        Ok(Self::default())
    }
}
