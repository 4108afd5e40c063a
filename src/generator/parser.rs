//! Parses the model's raw text into structured fields and enforces the
//! structural contract: at least one "・項目名：内容" bulleted item with a
//! non-empty label and content, plus dedicated 要約/タグ lines.

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResponse {
    pub summary: String,
    pub detailed_summary: String,
    pub tags: Vec<String>,
    pub category: Option<String>,
}

pub const BULLET_MARKER: char = '・';

static SUMMARY_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*要約[：:]\s*(.+)\s*$").unwrap());
static TAGS_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*タグ[：:]\s*(.+)\s*$").unwrap());
static CATEGORY_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*カテゴリー?[：:]\s*(.+)\s*$").unwrap());

/// Split a bulleted line into (label, content). `None` when the line is not
/// a bullet or either side of the colon is empty.
pub fn split_bullet_item(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim();
    let rest = trimmed.strip_prefix(BULLET_MARKER)?;
    let (label, content) = rest
        .split_once('：')
        .or_else(|| rest.split_once(':'))?;
    let label = label.trim();
    let content = content.trim();
    if label.is_empty() || content.is_empty() {
        return None;
    }
    Some((label, content))
}

fn capture_line(regex: &Regex, raw: &str) -> Option<String> {
    regex
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Split a tag line on Japanese and ASCII commas, dropping decorations.
pub fn split_tags(line: &str) -> Vec<String> {
    line.split(['、', ',', '，'])
        .map(|tag| tag.trim().trim_start_matches('#').trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Parse the full structured response. Parsing itself is lenient; use
/// [`validate`] to enforce the contract.
pub fn parse(raw: &str) -> ParsedResponse {
    let summary = capture_line(&SUMMARY_LINE, raw).unwrap_or_default();
    let category = capture_line(&CATEGORY_LINE, raw);
    let tags = capture_line(&TAGS_LINE, raw)
        .map(|line| split_tags(&line))
        .unwrap_or_default();

    let detailed_summary = raw
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with(BULLET_MARKER))
        .collect::<Vec<_>>()
        .join("\n");

    ParsedResponse {
        summary,
        detailed_summary,
        tags,
        category,
    }
}

/// Structural well-formedness: a non-empty summary and at least one valid
/// bulleted item.
pub fn validate(parsed: &ParsedResponse) -> bool {
    if parsed.summary.is_empty() {
        return false;
    }
    parsed
        .detailed_summary
        .lines()
        .filter_map(|line| split_bullet_item(line))
        .count()
        > 0
}

/// Lenient extraction for the summary-only path: just the 要約 line and an
/// optional タグ line.
pub fn extract_summary_only(raw: &str) -> Option<(String, Vec<String>)> {
    let summary = capture_line(&SUMMARY_LINE, raw)?;
    let tags = capture_line(&TAGS_LINE, raw)
        .map(|line| split_tags(&line))
        .unwrap_or_default();
    Some((summary, tags))
}
