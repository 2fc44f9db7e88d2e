// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Text reports.
//!
//! Each renderer returns the report as lines; the caller joins them with
//! `\n` and prints or saves them. A missing record is never an error here:
//! it becomes a single placeholder line and the report carries on.

use crate::casting::CastDetail;
use crate::errors::NotFound;
use crate::hexagram::LinePosition;
use crate::knowledge::{HexagramRecord, Lookup, PairingRecord};
use crate::oracle::{Comparison, DerivedFigures, Figure, Reading, Study};
use crate::ruling::MovingLine;
use std::path::Path;
use tracing::warn;

/// Shown for any empty field.
pub const NONE_TEXT: &str = "无";

pub const PRIMARY_TITLE: &str = "本卦（当前状态）";
pub const RESULTING_TITLE: &str = "变卦（预测结果）";
pub const MUTUAL_TITLE: &str = "互卦（内在原因）";
pub const INVERSE_TITLE: &str = "错卦（应对策略）";
pub const REVERSED_TITLE: &str = "综卦（外在阻力）";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Hide binary codes and the arithmetic of the cast.
    pub simplified: bool,
    /// Also show the ruling line's texts in each derived figure.
    pub derived_details: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            simplified: true,
            derived_details: false,
        }
    }
}

/// Load the prompt fragments placed at the top of a saved reading.
///
/// Blank lines are dropped. A missing or unreadable file gives no prompts.
pub fn load_prompts(path: &Path) -> Vec<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect(),
        Err(err) => {
            warn!(
                path = %path.display(),
                %err,
                "prompt file not loaded, continuing without prompts"
            );
            Vec::new()
        }
    }
}

/// The enquirer's question, placed after the prompts.
pub fn question_header(background: &str, question: &str) -> Vec<String> {
    vec![
        "\n## 占卜".to_string(),
        format!("- 问题背景：{}", or_none(background)),
        format!("- 问题：{}", or_none(question)),
        "\n---\n你的解卦：".to_string(),
    ]
}

/// The full report of one divination.
pub fn render_reading(reading: &Reading<'_>, options: ReportOptions) -> Vec<String> {
    let mut out = Vec::new();
    if !options.simplified {
        out.push(format!("起卦方式：{}", reading.method));
    }

    push_figure(&mut out, PRIMARY_TITLE, &reading.primary, options);
    if let Ok(record) = &reading.primary.record {
        push_moving_line(&mut out, record, reading.moving_line);
    }
    if !options.simplified {
        push_cast_detail(&mut out, reading);
    }

    push_figure(&mut out, RESULTING_TITLE, &reading.resulting, options);
    push_pairing(&mut out, &reading.pairing);
    push_derived(&mut out, &reading.derived, Some(reading.moving_line), options);
    out
}

/// The report of a single hexagram looked up by name.
pub fn render_single(study: &Study<'_>, options: ReportOptions) -> Vec<String> {
    let mut out = Vec::new();
    push_figure(&mut out, "本卦查询", &study.figure, options);
    push_derived(&mut out, &study.derived, None, options);
    out
}

/// The report of a primary hexagram changing at one line into another.
pub fn render_change(comparison: &Comparison<'_>, options: ReportOptions) -> Vec<String> {
    let mut out = Vec::new();
    push_figure(&mut out, PRIMARY_TITLE, &comparison.primary, options);
    if let Ok(record) = &comparison.primary.record {
        out.push(format!("\n===== 指定动爻：第 {} 爻 =====", comparison.line));
        push_line_texts(&mut out, record, comparison.line);
    }
    push_figure(&mut out, RESULTING_TITLE, &comparison.resulting, options);
    push_pairing(&mut out, &comparison.pairing);
    let moving = MovingLine::Line(comparison.line);
    push_derived(&mut out, &comparison.derived, Some(moving), options);
    out
}

fn or_none(text: &str) -> &str {
    match text.trim() {
        "" => NONE_TEXT,
        text => text,
    }
}

fn push_figure(out: &mut Vec<String>, title: &str, figure: &Figure<'_>, options: ReportOptions) {
    let record = match &figure.record {
        Ok(record) => record,
        Err(_) => {
            out.push(format!("未找到 {}：{}", title, figure.code));
            return;
        }
    };

    out.push(format!("\n===== {} =====", title));
    out.push(format!("卦名：{}（{}）", or_none(&record.name), or_none(&record.figure)));
    out.push(format!("上卦：{}", or_none(&record.upper_trigram)));
    out.push(format!("下卦：{}", or_none(&record.lower_trigram)));
    if !options.simplified {
        out.push(format!("二进制：{}", figure.code));
    }
    out.push(format!("世爻：第 {} 爻", figure.governing));
    out.push(format!(
        "世爻爻辞：{}",
        record.line_text(figure.governing).map_or(NONE_TEXT, or_none)
    ));
    out.push(format!("杂卦：{}", or_none(&record.miscellany)));
    out.push(format!("卦辞：{}", or_none(&record.judgment)));
    out.push(format!("大象：{}", or_none(&record.image)));
    out.push(format!("彖传：{}", or_none(&record.explanation)));
}

fn push_line_texts(out: &mut Vec<String>, record: &HexagramRecord, line: LinePosition) {
    out.push(format!(
        "爻辞：{}",
        record.line_text(line).map_or(NONE_TEXT, or_none)
    ));
    out.push(format!(
        "小象：{}",
        record.line_commentary(line).map_or(NONE_TEXT, or_none)
    ));
}

fn push_moving_line(out: &mut Vec<String>, record: &HexagramRecord, moving: MovingLine) {
    out.push("\n===== 主动爻 =====".to_string());
    match moving {
        MovingLine::None => out.push("主动爻：无（六爻皆静）".to_string()),
        MovingLine::Line(line) => {
            out.push(format!("主动爻：第 {} 爻", line));
            push_line_texts(out, record, line);
        }
        MovingLine::Governing => {
            out.push("主动爻：六爻皆变".to_string());
            out.push(format!(
                "爻辞：{}",
                record.all_lines_text().map_or(NONE_TEXT, or_none)
            ));
        }
    }
}

fn push_cast_detail(out: &mut Vec<String>, reading: &Reading<'_>) {
    match &reading.cast.detail {
        CastDetail::Coins { lines } => {
            out.push("\n----- 摇卦过程 -----".to_string());
            for line in lines.iter().rev() {
                let marker = if line.changing { "（动）" } else { "" };
                out.push(format!("第 {} 爻：{}{}", line.position, line.value, marker));
            }
            out.push(format!("变爻掩码：{}", reading.cast.mask));
        }
        CastDetail::Seeded(draw) => {
            out.push("\n----- 变卦计算过程 -----".to_string());
            out.push(format!("起卦种子：{}", draw.seed));
            out.push(format!("本卦二进制数：{}", draw.primary_key));
            out.push(format!("动爻数：{}", draw.moving_count));
            out.push(format!("本卦动爻掩码：{}", draw.count_mask));
            out.push(format!("生成的随机二进制数：{}", draw.random_bits));
            out.push(format!("随机数与动爻掩码按位与结果：{}", draw.actual_mask));
            out.push(format!("与本卦二进制数按位或结果：{}", draw.combined));
            out.push(format!("规范化后的变卦二进制数：{}", draw.resulting_key));
        }
    }
}

fn push_pairing(out: &mut Vec<String>, pairing: &Lookup<'_, PairingRecord>) {
    out.push("\n===== 焦氏易林解 =====".to_string());
    match pairing {
        Ok(entry) => {
            out.push(format!("本卦：{}", entry.primary));
            out.push(format!("变卦：{}", entry.resulting));
            out.push(format!("焦氏易林辞：{}", or_none(&entry.verdict)));
        }
        Err(NotFound::Pairing { primary, resulting }) => {
            out.push(format!("未找到从 {} 到 {} 的焦氏易林记录。", primary, resulting));
        }
        Err(_) => out.push("未找到焦氏易林记录。".to_string()),
    }
}

fn push_derived(
    out: &mut Vec<String>,
    derived: &DerivedFigures<'_>,
    moving: Option<MovingLine>,
    options: ReportOptions,
) {
    for (title, figure) in [
        (MUTUAL_TITLE, &derived.mutual),
        (INVERSE_TITLE, &derived.inverse),
        (REVERSED_TITLE, &derived.reversed),
    ] {
        push_figure(out, title, figure, options);
        let details = (options.derived_details, moving, &figure.record);
        if let (true, Some(moving), Ok(record)) = details {
            push_moving_line(out, record, moving);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::casting::{Cast, CoinMethod, LineOutcome, SeededDraw};
    use crate::hexagram::{HexagramCode, LineValue, SeedKey};
    use crate::knowledge::KnowledgeBase;
    use crate::oracle::Oracle;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write;

    fn qian_kun() -> KnowledgeBase {
        let qian = HexagramRecord {
            name: "乾".into(),
            figure: "乾为天".into(),
            upper_trigram: "乾".into(),
            lower_trigram: "乾".into(),
            bits6: Some("000000".into()),
            line_texts: ["初九", "九二", "九三", "九四", "九五", "上九", "用九"]
                .map(String::from)
                .to_vec(),
            line_commentary: ["a", "b", "c", "d", "e", "f"].map(String::from).to_vec(),
            judgment: "元亨利贞".into(),
            ..Default::default()
        };
        let kun = HexagramRecord {
            name: "坤".into(),
            bits6: Some("111111".into()),
            line_texts: ["初六", "六二", "六三", "六四", "六五", "上六", "用六"]
                .map(String::from)
                .to_vec(),
            ..Default::default()
        };
        let pairing = PairingRecord {
            primary: "乾".into(),
            resulting: "坤".into(),
            verdict: "典册法书".into(),
        };
        KnowledgeBase::new(vec![qian, kun], vec![pairing])
    }

    fn contains(lines: &[String], text: &str) -> bool {
        lines.iter().any(|line| line.contains(text))
    }

    #[test]
    fn test_all_lines_changing_reading() {
        let oracle = Oracle::new(qian_kun());
        let cast = CoinMethod::encode(&[LineOutcome::OldYang; 6]).unwrap();
        let reading = oracle.read("coins", cast).unwrap();
        let lines = render_reading(&reading, ReportOptions::default());

        assert!(contains(&lines, "===== 本卦（当前状态） ====="));
        assert!(contains(&lines, "卦名：乾（乾为天）"));
        assert!(contains(&lines, "世爻：第 6 爻"));
        assert!(contains(&lines, "世爻爻辞：上九"));
        assert!(contains(&lines, "主动爻：六爻皆变"));
        assert!(contains(&lines, "爻辞：用九"));
        assert!(contains(&lines, "卦名：坤（无）"));
        assert!(contains(&lines, "焦氏易林辞：典册法书"));
        // Mutual of 乾 is 乾, inverse is 坤, reversed is 乾.
        assert!(contains(&lines, "===== 互卦（内在原因） ====="));
        assert!(contains(&lines, "===== 错卦（应对策略） ====="));
        assert!(!contains(&lines, "二进制"));
    }

    #[test]
    fn test_missing_records_become_placeholders() {
        let oracle = Oracle::new(qian_kun());
        use LineOutcome::*;
        // Only line 1 changes: 乾 becomes 000001, which is not in the table.
        let cast =
            CoinMethod::encode(&[OldYang, YoungYang, YoungYang, YoungYang, YoungYang, YoungYang])
                .unwrap();
        let reading = oracle.read("coins", cast).unwrap();
        let lines = render_reading(&reading, ReportOptions::default());

        assert!(contains(&lines, "主动爻：第 1 爻"));
        assert!(contains(&lines, "爻辞：初九"));
        assert!(contains(&lines, "小象：a"));
        assert!(contains(&lines, "未找到 变卦（预测结果）：000001"));
        assert!(contains(&lines, "未找到从 乾 到 000001 的焦氏易林记录。"));
    }

    #[test]
    fn test_full_report_shows_arithmetic() {
        let oracle = Oracle::new(qian_kun());
        let options = ReportOptions {
            simplified: false,
            derived_details: true,
        };

        let mut rng = StdRng::seed_from_u64(8);
        let reading = oracle.divine(&CoinMethod, &mut rng).unwrap();
        let lines = render_reading(&reading, options);
        assert!(contains(&lines, "起卦方式：coins"));
        assert!(contains(&lines, "----- 摇卦过程 -----"));
        assert!(contains(&lines, "变爻掩码："));

        let draw = SeededDraw::compute(SeedKey::from_parts(LineValue::Solid, 0), 6, 0);
        let code = HexagramCode::ALL_SOLID;
        let cast = Cast::new(code, code, code.diff(code), CastDetail::Seeded(draw)).unwrap();
        let reading = oracle.read("seeded", cast).unwrap();
        let lines = render_reading(&reading, options);
        assert!(contains(&lines, "----- 变卦计算过程 -----"));
        assert!(contains(&lines, "本卦动爻掩码：0111111"));
        assert!(contains(&lines, "二进制：000000"));
        // The drawn count names line 6, shown in every derived figure too.
        assert_eq!(lines.iter().filter(|l| l.as_str() == "主动爻：第 6 爻").count(), 4);
    }

    #[test]
    fn test_render_single_and_change() {
        let oracle = Oracle::new(qian_kun());
        let study = oracle.study("乾").unwrap().unwrap();
        let lines = render_single(&study, ReportOptions::default());
        assert!(contains(&lines, "===== 本卦查询 ====="));
        assert!(contains(&lines, "===== 综卦（外在阻力） ====="));

        let comparison = oracle
            .compare("乾", LinePosition::new(3), "坤")
            .unwrap()
            .unwrap();
        let lines = render_change(&comparison, ReportOptions::default());
        assert!(contains(&lines, "===== 指定动爻：第 3 爻 ====="));
        assert!(contains(&lines, "爻辞：九三"));
        assert!(contains(&lines, "小象：c"));
        assert!(contains(&lines, "焦氏易林辞：典册法书"));
    }

    #[test]
    fn test_question_header_and_prompts() {
        let header = question_header("  ", "前途如何");
        assert_eq!(header[1], "- 问题背景：无");
        assert_eq!(header[2], "- 问题：前途如何");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "你是一位易学家。\n\n  请解卦。  ").unwrap();
        assert_eq!(load_prompts(file.path()), vec!["你是一位易学家。", "请解卦。"]);
        assert!(load_prompts(Path::new("/nonexistent/prompt.txt")).is_empty());
    }
}
