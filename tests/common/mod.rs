// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use iching_oracle::knowledge::{HexagramRecord, KnowledgeBase, PairingRecord};
use iching_oracle::HexagramCode;
use std::io::Write;
use std::path::Path;

/// Synthetic name for a code, unique across the 64 figures.
pub fn name_of(code: HexagramCode) -> String {
    format!("卦{:02}", code.bits())
}

/// A record with every text field filled, so reports never show placeholders.
pub fn record_for(code: HexagramCode) -> HexagramRecord {
    let name = name_of(code);
    let mut line_texts: Vec<String> = (1..=6).map(|i| format!("{} 爻辞 {}", name, i)).collect();
    if code == HexagramCode::ALL_SOLID || code == HexagramCode::ALL_BROKEN {
        line_texts.push(format!("{} 用辞", name));
    }
    HexagramRecord {
        figure: format!("{}之象", name),
        upper_trigram: format!("{:03b}", code.upper()),
        lower_trigram: format!("{:03b}", code.lower()),
        bits6: Some(code.to_string()),
        line_commentary: (1..=6).map(|i| format!("{} 小象 {}", name, i)).collect(),
        line_texts,
        judgment: format!("{} 卦辞", name),
        image: format!("{} 大象", name),
        explanation: format!("{} 彖传", name),
        miscellany: format!("{} 杂卦", name),
        name,
        ..Default::default()
    }
}

pub fn hexagram_table() -> Vec<HexagramRecord> {
    HexagramCode::all().map(record_for).collect()
}

pub fn pairing_table() -> Vec<PairingRecord> {
    HexagramCode::all()
        .flat_map(|primary| {
            HexagramCode::all().map(move |resulting| PairingRecord {
                primary: name_of(primary),
                resulting: name_of(resulting),
                verdict: format!("{}之{}", name_of(primary), name_of(resulting)),
            })
        })
        .collect()
}

/// The complete 64-record / 4096-pairing knowledge base.
pub fn full_knowledge_base() -> KnowledgeBase {
    KnowledgeBase::new(hexagram_table(), pairing_table())
}

/// Write both tables as JSON files under `dir`, returning their paths.
pub fn write_tables(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let hexagrams = dir.join("64_Gua_Data.json");
    let pairings = dir.join("64_Gua_Data_4096.json");
    write_json(&hexagrams, &serde_json::to_string(&hexagram_table()).unwrap());
    write_json(&pairings, &serde_json::to_string(&pairing_table()).unwrap());
    (hexagrams, pairings)
}

pub fn write_json(path: &Path, content: &str) {
    let mut file = std::fs::File::create(path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
}
