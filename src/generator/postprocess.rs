//! Deterministic safety-net formatting, applied after validation and before
//! storage. Length enforcement only ever removes whole sentences; nothing
//! here invents content or pads short text.

use crate::generator::parser::split_bullet_item;
use tracing::{debug, warn};

/// Texts at or under this length are left alone regardless of `max`.
const SAFETY_THRESHOLD: usize = 300;

const SUMMARY_MIN: usize = 180;
const SUMMARY_MAX: usize = 220;
const DETAIL_MIN: usize = 500;
const DETAIL_HARD_MAX: usize = 1000;
const DETAIL_RECLAMP_MIN: usize = 500;
const DETAIL_RECLAMP_MAX: usize = 600;

const ITEM_MIN: usize = 100;
const ITEM_MAX: usize = 120;

/// Clamp `text` to `max` characters by rebuilding it sentence-by-sentence on
/// the Japanese full stop. No-op while the text is within the safety
/// threshold; text below `min` is only logged, never padded.
pub fn enforce_length(text: &str, min: usize, max: usize) -> String {
    let count = text.chars().count();
    if count <= SAFETY_THRESHOLD {
        if count < min {
            debug!(count, min, "text below minimum length, keeping as-is");
        }
        return text.to_string();
    }

    let mut rebuilt = String::new();
    let mut rebuilt_chars = 0usize;
    for sentence in text.split('。') {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }
        let sentence_chars = sentence.chars().count() + 1;
        if rebuilt_chars + sentence_chars > max {
            break;
        }
        rebuilt.push_str(sentence);
        rebuilt.push('。');
        rebuilt_chars += sentence_chars;
    }

    if rebuilt.is_empty() {
        // First sentence alone exceeds max; hard cut is the last resort.
        rebuilt = text.chars().take(max.saturating_sub(1)).collect();
        rebuilt.push('。');
        rebuilt_chars = rebuilt.chars().count();
    }

    if rebuilt_chars < min {
        debug!(
            count = rebuilt_chars,
            min, "rebuilt text below minimum length"
        );
    }
    rebuilt
}

/// Strip the trailing full stop from bulleted lines; other lines untouched.
pub fn remove_bullet_point_periods(text: &str) -> String {
    text.lines()
        .map(|line| {
            let trimmed = line.trim_end();
            if trimmed.trim_start().starts_with('・') {
                trimmed.trim_end_matches('。')
            } else {
                trimmed
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Truncate one item's content to `item_max` chars, preferring to cut at the
/// last Japanese comma/period when it falls past 80% of the window.
fn truncate_item(content: &str, item_max: usize) -> String {
    if content.chars().count() <= item_max {
        return content.to_string();
    }
    let window: Vec<char> = content.chars().take(item_max).collect();
    let cut_at = window
        .iter()
        .enumerate()
        .filter(|(_, c)| matches!(c, '、' | '。'))
        .map(|(i, _)| i + 1)
        .next_back();
    match cut_at {
        Some(position) if position * 5 > item_max * 4 => window[..position].iter().collect(),
        _ => window.iter().collect(),
    }
}

/// Clamp each bulleted item's content to the `[item_min, item_max]` window.
/// Items below `item_min` are only logged.
pub fn adjust_detailed_summary_items(text: &str, item_min: usize, item_max: usize) -> String {
    text.lines()
        .map(|line| {
            if let Some((label, content)) = split_bullet_item(line) {
                let count = content.chars().count();
                if count < item_min {
                    debug!(label, count, item_min, "item below minimum length");
                }
                format!("・{}：{}", label, truncate_item(content, item_max))
            } else if line.trim_start().starts_with('・') {
                format!("・{}", truncate_item(line.trim_start().trim_start_matches('・'), item_max))
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full post-processing pass over the two summaries.
pub fn post_process_summaries(summary: &str, detailed_summary: &str) -> (String, String) {
    let summary = enforce_length(summary, SUMMARY_MIN, SUMMARY_MAX);

    let detailed = remove_bullet_point_periods(detailed_summary);
    let detailed = adjust_detailed_summary_items(&detailed, ITEM_MIN, ITEM_MAX);

    let detail_chars = detailed.chars().count();
    let detailed = if detail_chars > DETAIL_HARD_MAX {
        enforce_length(&detailed, DETAIL_RECLAMP_MIN, DETAIL_RECLAMP_MAX)
    } else {
        if detail_chars < DETAIL_MIN {
            warn!(
                count = detail_chars,
                "detailed summary below target length"
            );
        }
        detailed
    };

    (summary, detailed)
}
