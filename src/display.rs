//! Display-side parsing of a stored detailed summary into ordered sections.
//!
//! Distinct from the generation-time validator: this parser must not fail on
//! malformed input. Unmatched lines degrade to continuations of the previous
//! section, both "・" and "-" bullet markers are tolerated, and items beyond
//! the canonical section list land in an "extra" bucket instead of being
//! dropped.

use crate::generator::types::SUMMARY_VERSION;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    pub icon: String,
    pub content: String,
}

/// Canonical ordered section layout for format version 3. Items are matched
/// by position, not by label text.
const SECTIONS_V3: &[(&str, &str)] = &[
    ("ポイント", "📌"),
    ("技術的な詳細", "⚙️"),
    ("背景", "🔍"),
    ("今後の展望", "🚀"),
];

const EXTRA_SECTION: (&str, &str) = ("補足", "📝");

fn section_layout(summary_version: u32) -> &'static [(&'static str, &'static str)] {
    // Only one structured format version exists today; older stored rows
    // carry version numbers below SUMMARY_VERSION and use the same layout.
    let _ = summary_version;
    SECTIONS_V3
}

fn strip_bullet(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    trimmed
        .strip_prefix('・')
        .or_else(|| trimmed.strip_prefix("- "))
        .or_else(|| trimmed.strip_prefix('-'))
        .map(str::trim)
}

/// Remove a redundant "label：" echo at the start of `content`.
fn strip_label_echo<'a>(content: &'a str, label: &str) -> &'a str {
    for colon in ["：", ":"] {
        if let Some(rest) = content.strip_prefix(&format!("{label}{colon}")) {
            return rest.trim_start();
        }
    }
    content
}

/// Parse `detailed_summary` into presentation sections. Never fails;
/// malformed lines become continuations of the previous section.
pub fn parse_for_display(detailed_summary: &str, summary_version: u32) -> Vec<Section> {
    let layout = section_layout(summary_version);
    let mut sections: Vec<Section> = Vec::new();

    for line in detailed_summary.lines() {
        let line = line.trim();
        if line.is_empty() || line == "詳細要約：" || line == "詳細要約:" {
            continue;
        }

        let Some(item) = strip_bullet(line) else {
            // Continuation of the previous section; ignore leading prose
            // before the first bullet.
            if let Some(last) = sections.last_mut() {
                if !last.content.is_empty() {
                    last.content.push('\n');
                }
                last.content.push_str(line);
            }
            continue;
        };

        let position = sections.len();
        let (canonical_title, icon) = layout.get(position).copied().unwrap_or(EXTRA_SECTION);

        let (title, content) = match item.split_once('：').or_else(|| item.split_once(':')) {
            Some((label, content)) if !label.trim().is_empty() => {
                let label = label.trim();
                (label.to_string(), strip_label_echo(content.trim(), label))
            }
            _ => (canonical_title.to_string(), item),
        };

        sections.push(Section {
            title,
            icon: icon.to_string(),
            content: content.to_string(),
        });
    }

    sections
}

/// Parse with the current format version.
pub fn parse_for_display_current(detailed_summary: &str) -> Vec<Section> {
    parse_for_display(detailed_summary, SUMMARY_VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANONICAL: &str = "・ポイント：本文抽出の優先順位を解説\n\
        ・技術的な詳細：セレクタ連鎖とフォールバックの実装\n\
        ・背景：フィード本文が不完全なことが多い\n\
        ・今後の展望：対応サイトをデータ定義で増やす";

    #[test]
    fn canonical_roundtrip_counts_and_order() {
        let sections = parse_for_display(CANONICAL, SUMMARY_VERSION);
        assert_eq!(sections.len(), 4);
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["ポイント", "技術的な詳細", "背景", "今後の展望"]);
        assert_eq!(sections[0].icon, "📌");
        assert_eq!(sections[3].icon, "🚀");
        assert_eq!(sections[0].content, "本文抽出の優先順位を解説");
    }

    #[test]
    fn hyphen_bullets_are_tolerated() {
        let sections = parse_for_display("- ポイント：内容A\n- 背景：内容B", SUMMARY_VERSION);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].content, "内容A");
    }

    #[test]
    fn items_beyond_layout_go_to_extra_bucket() {
        let text = format!("{CANONICAL}\n・追加項目：五つ目の内容");
        let sections = parse_for_display(&text, SUMMARY_VERSION);
        assert_eq!(sections.len(), 5);
        assert_eq!(sections[4].icon, "📝");
        assert_eq!(sections[4].title, "追加項目");
    }

    #[test]
    fn label_echo_is_stripped() {
        let sections =
            parse_for_display("・ポイント：ポイント：二重ラベルの内容", SUMMARY_VERSION);
        assert_eq!(sections[0].content, "二重ラベルの内容");
    }

    #[test]
    fn line_without_colon_uses_canonical_title() {
        let sections = parse_for_display("・ラベルなしの内容だけ", SUMMARY_VERSION);
        assert_eq!(sections[0].title, "ポイント");
        assert_eq!(sections[0].content, "ラベルなしの内容だけ");
    }

    #[test]
    fn unmatched_lines_continue_previous_section() {
        let text = "・ポイント：一行目\n続きの行です\nさらに続き";
        let sections = parse_for_display(text, SUMMARY_VERSION);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, "一行目\n続きの行です\nさらに続き");
    }

    #[test]
    fn malformed_input_does_not_panic() {
        for garbage in ["", "：：：", "no bullets at all", "・：", "----"] {
            let _ = parse_for_display(garbage, SUMMARY_VERSION);
        }
    }

    #[test]
    fn leading_prose_before_first_bullet_is_ignored() {
        let sections = parse_for_display("前置きの文\n・ポイント：内容", SUMMARY_VERSION);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, "内容");
    }
}
