// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Static table records.
//!
//! The record shape is fixed by the JSON tables: flat objects with
//! Chinese-labelled keys. Every field is optional on input.

use crate::hexagram::{HexagramCode, LinePosition, SeedKey};
use serde::{Deserialize, Serialize};

/// One of the 64 hexagram records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexagramRecord {
    #[serde(rename = "六十四卦名", default)]
    pub name: String,

    /// Short label describing the figure.
    #[serde(rename = "六十四卦象", default)]
    pub figure: String,

    #[serde(rename = "上卦", default)]
    pub upper_trigram: String,

    #[serde(rename = "下卦", default)]
    pub lower_trigram: String,

    /// 6-bit code string, top line first.
    #[serde(rename = "6_BIT", default, skip_serializing_if = "Option::is_none")]
    pub bits6: Option<String>,

    /// 7-bit normalized code string, for the seeded method.
    #[serde(rename = "7_BIT", default, skip_serializing_if = "Option::is_none")]
    pub bits7: Option<String>,

    /// Line texts, bottom line first. The Creative and the Receptive carry a
    /// seventh text for the case where all lines change.
    #[serde(rename = "爻辞", default)]
    pub line_texts: Vec<String>,

    /// Commentary on each line text, same order.
    #[serde(rename = "小象", default)]
    pub line_commentary: Vec<String>,

    #[serde(rename = "卦辞", default)]
    pub judgment: String,

    #[serde(rename = "大象", default)]
    pub image: String,

    #[serde(rename = "彖传", default)]
    pub explanation: String,

    /// The contrasting figure named in the Miscellaneous Notes.
    #[serde(rename = "杂卦", default)]
    pub miscellany: String,
}

impl HexagramRecord {
    /// The code of this record, from the 6-bit key or else the 7-bit key.
    pub fn code(&self) -> Option<HexagramCode> {
        self.bits6
            .as_deref()
            .and_then(|bits| HexagramCode::parse(bits).ok())
            .or_else(|| {
                self.bits7
                    .as_deref()
                    .and_then(|bits| SeedKey::parse(bits).ok())
                    .map(|key| key.normalized().code())
            })
    }

    pub fn line_text(&self, position: LinePosition) -> Option<&str> {
        self.line_texts.get(position.as_index()).map(String::as_str)
    }

    pub fn line_commentary(&self, position: LinePosition) -> Option<&str> {
        self.line_commentary
            .get(position.as_index())
            .map(String::as_str)
    }

    /// The text read when all six lines of a pure extreme change.
    pub fn all_lines_text(&self) -> Option<&str> {
        self.line_texts.get(6).map(String::as_str)
    }
}

/// One of the 4096 (primary, resulting) verdicts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingRecord {
    #[serde(rename = "本卦", default)]
    pub primary: String,

    #[serde(rename = "变卦", default)]
    pub resulting: String,

    #[serde(rename = "焦氏易林辞", default)]
    pub verdict: String,
}
