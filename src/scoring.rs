//! Heuristic article quality score: additive weighted signals clamped to
//! [0, 100]. Pure and deterministic (time is an explicit argument) so the
//! whole model is property-testable.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Everything the scorer looks at. A view over the caller's article record;
/// missing fields simply contribute nothing.
#[derive(Debug, Clone, Default)]
pub struct ScorableArticle {
    pub title: String,
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub source_name: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub bookmark_count: i64,
    pub user_votes: i64,
}

/// Source-boilerplate tag names excluded from the richness count.
const GENERIC_TAGS: &[&str] = &[
    "はてなブックマーク",
    "ニュース",
    "テクノロジー",
    "IT",
    "記事",
    "まとめ",
    "techfeed",
];

/// Named sources with a fixed trust bonus; anything else gets the default.
const SOURCE_TRUST: &[(&str, i64)] = &[
    ("Publickey", 20),
    ("gihyo.jp", 18),
    ("ITmedia", 15),
    ("Qiita", 15),
    ("Zenn", 15),
    ("CodeZine", 12),
    ("はてなブックマーク", 10),
];
const SOURCE_TRUST_DEFAULT: i64 = 10;

static CLICKBAIT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^\d+選",
        r"^【?\d+個",
        r"絶対に",
        r"すぎる",
        r"理由$",
        r"衝撃",
        r"必見",
        r"ヤバい",
        r"知らないと損",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

fn tag_richness(tags: &[String]) -> i64 {
    let distinct: HashSet<&str> = tags
        .iter()
        .map(|tag| tag.as_str())
        .filter(|tag| !tag.trim().is_empty())
        .filter(|tag| !GENERIC_TAGS.contains(tag))
        .collect();
    match distinct.len() {
        n if n >= 5 => 30,
        n if n >= 3 => 25,
        2 => 15,
        1 => 10,
        _ => 0,
    }
}

fn summary_length_bonus(summary: Option<&str>) -> i64 {
    let count = summary.map(|s| s.chars().count()).unwrap_or(0);
    if (60..=120).contains(&count) {
        20
    } else if count >= 40 {
        15
    } else if count >= 20 {
        10
    } else {
        0
    }
}

fn source_trust(source_name: Option<&str>) -> i64 {
    let Some(name) = source_name else {
        return SOURCE_TRUST_DEFAULT;
    };
    SOURCE_TRUST
        .iter()
        .find(|(known, _)| name.contains(known))
        .map(|(_, points)| *points)
        .unwrap_or(SOURCE_TRUST_DEFAULT)
}

fn freshness(published_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> i64 {
    let Some(published) = published_at else {
        return 0;
    };
    // Future dates count as just published.
    let age_days = (now - published).num_days().max(0);
    match age_days {
        0..=1 => 15,
        2..=3 => 12,
        4..=7 => 8,
        8..=14 => 4,
        _ => 0,
    }
}

fn engagement(bookmark_count: i64) -> i64 {
    match bookmark_count {
        n if n >= 500 => 15,
        n if n >= 100 => 12,
        n if n >= 50 => 8,
        n if n >= 10 => 5,
        n if n >= 1 => 2,
        _ => 0,
    }
}

fn clickbait_penalty(title: &str) -> i64 {
    // Applied once, no matter how many patterns match.
    if CLICKBAIT_PATTERNS
        .iter()
        .any(|pattern| pattern.is_match(title))
    {
        -10
    } else {
        0
    }
}

fn vote_bonus(votes: i64) -> i64 {
    // min(votes * 2, 20), floored at zero; clamp first to dodge overflow.
    votes.clamp(0, 10) * 2
}

/// Score against an explicit clock; the property-test entry point.
pub fn score_at(article: &ScorableArticle, now: DateTime<Utc>) -> u32 {
    let total = tag_richness(&article.tags)
        + summary_length_bonus(article.summary.as_deref())
        + source_trust(article.source_name.as_deref())
        + freshness(article.published_at, now)
        + engagement(article.bookmark_count)
        + clickbait_penalty(&article.title)
        + vote_bonus(article.user_votes);
    total.clamp(0, 100) as u32
}

/// Score with the current time. See [`score_at`].
pub fn score(article: &ScorableArticle) -> u32 {
    score_at(article, Utc::now())
}
