//! Content preprocessing and prompt-tier selection.
//!
//! Decides, before any API call, whether the content can be summarized at
//! all (PDF payloads and low-signal aggregator stubs are skipped), then
//! picks a prompt sized to the content: summary-only for near-empty input,
//! a short-content prompt with banded targets, or the full structured
//! prompt requesting category, tags, and bulleted sections.

use crate::generator::types::{GenerationOptions, SourceInfo};
use url::Url;

/// Why generation must not be attempted. A skip is a deliberate signal, not
/// an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The "content" is a PDF payload or points at a PDF.
    Pdf,
    /// Aggregator stub pointing at a slide host; nothing to summarize.
    LowSignalExternal,
}

#[derive(Debug)]
pub enum Preprocessed {
    Skip(SkipReason),
    Ready(PromptPlan),
}

#[derive(Debug)]
pub struct PromptPlan {
    pub prompt: String,
    /// Summary-only path: no detailed summary was requested, so the
    /// response is parsed leniently and the quality gate does not apply.
    pub skip_detailed_summary: bool,
}

const SLIDE_HOSTS: &[&str] = &["speakerdeck.com", "slideshare.net", "docswell.com"];
const LOW_SIGNAL_SOURCES: &[&str] = &["はてなブックマーク", "Hatena"];

const MIN_CONTENT_CHARS: usize = 100;
const SHORT_CONTENT_CHARS: usize = 500;
const LOW_SIGNAL_CHARS: usize = 300;
const MIN_WORD_COUNT: usize = 20;

fn url_points_at_pdf(url: &str) -> bool {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_ascii_lowercase(),
        Err(_) => url.to_ascii_lowercase(),
    };
    path.ends_with(".pdf")
}

fn looks_like_pdf_payload(content: &str) -> bool {
    content.starts_with("%PDF-") || content.contains("%%EOF")
}

fn is_slide_host(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    SLIDE_HOSTS
        .iter()
        .any(|suffix| host == *suffix || host.ends_with(&format!(".{suffix}")))
}

fn is_low_signal_source(source: &SourceInfo) -> bool {
    source
        .source_name
        .as_deref()
        .map(|name| LOW_SIGNAL_SOURCES.iter().any(|s| name.contains(s)))
        .unwrap_or(false)
}

/// Truncate to `max` characters on a char boundary. Simple cut, no ellipsis.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

/// Decide skip-vs-generate and build the prompt.
pub fn preprocess(
    title: &str,
    content: Option<&str>,
    source: Option<&SourceInfo>,
    options: &GenerationOptions,
) -> Preprocessed {
    let raw = content.unwrap_or("");
    let url = source.and_then(|s| s.url.as_deref()).unwrap_or("");

    if url_points_at_pdf(url) || looks_like_pdf_payload(raw) {
        return Preprocessed::Skip(SkipReason::Pdf);
    }

    let char_count = raw.chars().count();
    if let Some(source) = source
        && is_low_signal_source(source)
        && char_count < LOW_SIGNAL_CHARS
        && is_slide_host(url)
    {
        return Preprocessed::Skip(SkipReason::LowSignalExternal);
    }

    let body: String = if char_count < MIN_CONTENT_CHARS {
        // Near-empty content: give the model the title and an explicit
        // instruction not to speculate.
        format!(
            "タイトル: {title}\n本文: （本文を取得できませんでした。タイトルから確実に分かる範囲のみ要約し、推測で内容を創作しないでください。）\n{raw}"
        )
    } else {
        truncate_chars(raw, options.content_max_length).to_string()
    };

    let chars = body.chars().count();
    let words = raw.split_whitespace().count();

    if char_count <= MIN_CONTENT_CHARS && words < MIN_WORD_COUNT {
        return Preprocessed::Ready(PromptPlan {
            prompt: summary_only_prompt(title, &body),
            skip_detailed_summary: true,
        });
    }

    let prompt = if chars <= SHORT_CONTENT_CHARS {
        short_content_prompt(title, &body, chars)
    } else {
        full_prompt(title, &body)
    };

    Preprocessed::Ready(PromptPlan {
        prompt,
        skip_detailed_summary: false,
    })
}

fn summary_only_prompt(title: &str, body: &str) -> String {
    format!(
        "以下の記事情報から、日本語で簡潔な要約を作成してください。\n\n\
         出力形式（この形式以外の文章は出力しないこと）:\n\
         要約：100文字以内の要約\n\
         タグ：関連タグを3個まで、読点（、）区切り\n\n\
         制約:\n\
         - 情報が不足している場合は推測で補わないこと\n\
         - 詳細要約は不要\n\n\
         {body}\n\
         タイトル: {title}"
    )
}

/// Detailed-summary targets scale with content length in three bands.
fn short_content_bands(chars: usize) -> (&'static str, &'static str) {
    if chars <= 200 {
        ("200〜300文字", "2〜3項目")
    } else if chars <= 350 {
        ("250〜400文字", "3項目")
    } else {
        ("300〜500文字", "3〜4項目")
    }
}

fn short_content_prompt(title: &str, body: &str, chars: usize) -> String {
    let (detail_length, item_count) = short_content_bands(chars);
    format!(
        "以下の短い記事を日本語で要約してください。\n\n\
         出力形式（この形式以外の文章は出力しないこと）:\n\
         要約：120文字程度の要約\n\
         カテゴリ：記事のカテゴリ名\n\
         タグ：関連タグを5個まで、読点（、）区切り\n\
         詳細要約：\n\
         ・項目名：内容\n\n\
         制約:\n\
         - 詳細要約は全体で{detail_length}、{item_count}とすること\n\
         - 各項目は「・項目名：内容」の形式で1行ずつ書くこと\n\
         - 本文にない情報を創作しないこと\n\n\
         タイトル: {title}\n\
         本文:\n{body}"
    )
}

fn full_prompt(title: &str, body: &str) -> String {
    format!(
        "以下の記事を日本語で要約してください。\n\n\
         出力形式（この形式以外の文章は出力しないこと）:\n\
         要約：180〜220文字の要約\n\
         カテゴリ：記事のカテゴリ名\n\
         タグ：関連タグを5個まで、読点（、）区切り\n\
         詳細要約：\n\
         ・ポイント：記事の最重要ポイント\n\
         ・技術的な詳細：技術的な中身の説明\n\
         ・背景：前提や経緯\n\
         ・今後の展望：影響や今後の動き\n\n\
         制約:\n\
         - 各項目は「・項目名：内容」の形式で1行ずつ、100〜120文字とすること\n\
         - 要約・詳細要約とも本文にない情報を創作しないこと\n\
         - 記号や装飾を使わないこと\n\n\
         タイトル: {title}\n\
         本文:\n{body}"
    )
}
