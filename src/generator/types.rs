use serde::Serialize;
use std::time::Duration;

/// Format version of the structured detailed summary. Bump when the
/// canonical section layout changes; the display parser keys off it.
pub const SUMMARY_VERSION: u32 = 3;

pub const ARTICLE_TYPE_UNIFIED: &str = "unified";

/// Stored in `detailed_summary` when the summary-only path ran and no
/// detailed summary was requested from the model.
pub const DETAIL_SKIPPED_SENTINEL: &str = "（詳細要約なし）";

/// Per-call generation knobs. Immutable for the duration of a call; callers
/// override any subset of the defaults.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub max_retries: u32,
    pub retry_delay: Duration,
    /// Minimum quality score a generated summary must reach to be accepted
    /// without retry.
    pub min_quality_score: u32,
    /// Content longer than this is truncated before prompting.
    pub content_max_length: usize,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay: Duration::from_millis(5000),
            min_quality_score: 40,
            content_max_length: 150_000,
        }
    }
}

/// Where the raw article came from; used by preprocessing (low-signal
/// aggregator rule) and the quality scorer (source trust).
#[derive(Debug, Clone, Default)]
pub struct SourceInfo {
    pub source_name: Option<String>,
    pub url: Option<String>,
}

/// The finished summary bundle. Created once per accepted generation
/// attempt and never mutated; a retry produces a new instance.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryResult {
    pub summary: String,
    pub detailed_summary: String,
    /// Canonical, de-duplicated tags.
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub article_type: &'static str,
    pub summary_version: u32,
    pub quality_score: u32,
}
