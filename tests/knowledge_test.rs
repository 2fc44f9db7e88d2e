// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Loading the tables and the configuration from disk.

mod common;

use iching_oracle::casting::CoinMethod;
use iching_oracle::config::{MethodKind, OracleConfig};
use iching_oracle::knowledge::KnowledgeBase;
use iching_oracle::report::{self, ReportOptions};
use iching_oracle::{HexagramCode, Oracle, OracleError, SeedKey};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

#[test]
fn test_load_tables_from_json() {
    let dir = tempfile::tempdir().unwrap();
    let (hexagrams, pairings) = common::write_tables(dir.path());
    let kb = KnowledgeBase::load(&hexagrams, &pairings).unwrap();

    assert_eq!(kb.hexagrams().len(), 64);
    assert_eq!(kb.pairings().len(), 4096);
    for code in HexagramCode::all() {
        let record = kb.lookup_hexagram(code).unwrap();
        assert_eq!(record.code(), Some(code));
        assert_eq!(kb.lookup_binary(&code.to_string()).unwrap().name, record.name);
    }
    assert_eq!(kb.lookup_pairing("卦01", "卦02").unwrap().verdict, "卦01之卦02");
}

#[test]
fn test_seven_bit_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("seeded.json");
    let records: Vec<serde_json::Value> = HexagramCode::all()
        .map(|code| {
            serde_json::json!({
                "六十四卦名": common::name_of(code),
                "7_BIT": SeedKey::from_code(code).to_string(),
            })
        })
        .collect();
    common::write_json(&path, &serde_json::to_string(&records).unwrap());
    common::write_json(&dir.path().join("pairs.json"), "[]");

    let kb = KnowledgeBase::load(&path, &dir.path().join("pairs.json")).unwrap();
    let code = HexagramCode::new(0b010_110);
    assert_eq!(kb.lookup_hexagram(code).unwrap().name, "卦22");
    assert_eq!(kb.lookup_binary("0010110").unwrap().name, "卦22");
    assert!(kb.lookup_binary("010110").is_err());
    assert!(kb.lookup_pairing("卦22", "卦22").is_err());
}

#[test]
fn test_malformed_json_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.json");
    common::write_json(&bad, "{ not json");
    let err = KnowledgeBase::load(&bad, &bad).unwrap_err();
    match err {
        OracleError::Parse { path, .. } => assert_eq!(path, bad),
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn test_missing_hexagram_table_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let (_, pairings) = common::write_tables(dir.path());
    let err = KnowledgeBase::load(&dir.path().join("missing.json"), &pairings).unwrap_err();
    assert!(matches!(err, OracleError::Io { .. }));
    assert!(err.to_string().contains("missing.json"));
}

#[test]
fn test_unusable_pairing_table_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let (hexagrams, _) = common::write_tables(dir.path());
    let bad = dir.path().join("bad.json");
    common::write_json(&bad, "{ not json");

    for pairings in [dir.path().join("missing.json"), bad] {
        let kb = KnowledgeBase::load(&hexagrams, &pairings).unwrap();
        assert_eq!(kb.hexagrams().len(), 64);
        assert!(kb.pairings().is_empty());
        assert!(kb.lookup_pairing("卦01", "卦02").is_err());
    }
}

#[test]
fn test_reading_renders_without_pairing_table() {
    let dir = tempfile::tempdir().unwrap();
    let (hexagrams, _) = common::write_tables(dir.path());
    let kb = KnowledgeBase::load(&hexagrams, &dir.path().join("missing.json")).unwrap();
    let oracle = Oracle::new(kb);

    let reading = oracle.divine(&CoinMethod, &mut StdRng::seed_from_u64(11)).unwrap();
    assert!(reading.pairing.is_err());
    let lines = report::render_reading(&reading, ReportOptions::default());
    assert!(!lines[0].starts_with("未找到"));
    assert!(lines.iter().any(|line| line.starts_with("未找到从")));
}

#[test]
fn test_config_names_the_tables() {
    let dir = tempfile::tempdir().unwrap();
    let (hexagrams, pairings) = common::write_tables(dir.path());
    let text = format!(
        concat!(
            "[data]\nhexagrams = {:?}\npairings = {:?}\n\n",
            "[cast]\nmethod = \"seeded\"\nmax_moving = 7\n",
        ),
        hexagrams.display().to_string(),
        pairings.display().to_string(),
    );
    let config_path = dir.path().join("oracle.toml");
    common::write_json(&config_path, &text);

    let config = OracleConfig::resolve(Some(&config_path)).unwrap();
    assert_eq!(config.cast.method, MethodKind::Seeded);
    assert_eq!(config.cast.max_moving, 7);
    let kb = KnowledgeBase::load(&config.data.hexagrams, &config.data.pairings).unwrap();
    assert_eq!(kb.hexagrams().len(), 64);

    assert!(matches!(
        OracleConfig::resolve(Some(Path::new("/nonexistent/oracle.toml"))),
        Err(OracleError::Io { .. })
    ));
}
