use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

/// Result of enriching an article from its source page. Ephemeral; the
/// caller merges it into its own article record.
///
/// If `content` is present it is longer than the adapter's configured
/// minimum. `content: None` with a thumbnail is a partial success only for
/// thumbnail-only adapters (slide and video hosts).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedContent {
    pub content: Option<String>,
    pub thumbnail: Option<Url>,
}

static SPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\u{3000}]+").unwrap());
static NEWLINE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n+").unwrap());

/// Collapse runs of spaces, collapse 3+ newlines to 2, trim.
pub fn normalize_whitespace(text: &str) -> String {
    let spaced = SPACE_RUNS.replace_all(text, " ");
    let collapsed = NEWLINE_RUNS.replace_all(&spaced, "\n\n");
    collapsed
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_space_runs() {
        assert_eq!(normalize_whitespace("a   b\t\tc"), "a b c");
    }

    #[test]
    fn normalize_collapses_newline_runs() {
        assert_eq!(normalize_whitespace("one\n\n\n\ntwo"), "one\n\ntwo");
    }

    #[test]
    fn normalize_handles_ideographic_space() {
        assert_eq!(normalize_whitespace("日本語　　テキスト"), "日本語 テキスト");
    }

    #[test]
    fn normalize_trims() {
        assert_eq!(normalize_whitespace("  \n padded \n "), "padded");
    }
}
