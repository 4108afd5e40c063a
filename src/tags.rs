//! Rule-table tag normalization: collapses spelling/casing variants into
//! canonical tags with categories.
//!
//! The table is ordered and the first matching pattern anywhere in it wins,
//! so specific rules must precede rules whose patterns would shadow them
//! (ChatGPT before GPT, React Native before React, GitHub before Git).
//! Compiled once at process start, immutable afterwards.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedTag {
    pub name: String,
    pub category: Option<String>,
}

struct NormalizationRule {
    patterns: &'static [&'static str],
    canonical: &'static str,
    category: Option<&'static str>,
}

const RULE_TABLE: &[NormalizationRule] = &[
    // --- AI / ML -----------------------------------------------------------
    NormalizationRule {
        patterns: &[r"(?i)chat[\s_-]*gpt"],
        canonical: "ChatGPT",
        category: Some("ai-ml"),
    },
    NormalizationRule {
        patterns: &[r"(?i)\bgpt-?\d", r"(?i)^gpt$"],
        canonical: "GPT",
        category: Some("ai-ml"),
    },
    NormalizationRule {
        patterns: &[r"(?i)claude"],
        canonical: "Claude",
        category: Some("ai-ml"),
    },
    NormalizationRule {
        patterns: &[r"(?i)gemini"],
        canonical: "Gemini",
        category: Some("ai-ml"),
    },
    NormalizationRule {
        patterns: &[r"(?i)^llms?$", r"大規模言語モデル"],
        canonical: "LLM",
        category: Some("ai-ml"),
    },
    NormalizationRule {
        patterns: &[r"(?i)machine\s*learning", r"(?i)^ml$", r"機械学習"],
        canonical: "機械学習",
        category: Some("ai-ml"),
    },
    NormalizationRule {
        patterns: &[r"(?i)^ai$", r"(?i)^generative\s*ai$", r"人工知能", r"生成AI"],
        canonical: "AI",
        category: Some("ai-ml"),
    },
    // --- Frameworks --------------------------------------------------------
    NormalizationRule {
        patterns: &[r"(?i)react[\s_-]*native"],
        canonical: "React Native",
        category: Some("framework"),
    },
    NormalizationRule {
        patterns: &[r"(?i)^react(\.?js)?$"],
        canonical: "React",
        category: Some("framework"),
    },
    NormalizationRule {
        patterns: &[r"(?i)^next\.?js$"],
        canonical: "Next.js",
        category: Some("framework"),
    },
    NormalizationRule {
        patterns: &[r"(?i)^vue(\.?js)?$"],
        canonical: "Vue.js",
        category: Some("framework"),
    },
    NormalizationRule {
        patterns: &[r"(?i)^rails$", r"(?i)ruby\s*on\s*rails"],
        canonical: "Rails",
        category: Some("framework"),
    },
    // --- Languages ---------------------------------------------------------
    NormalizationRule {
        patterns: &[r"(?i)^typescript$", r"(?i)^ts$"],
        canonical: "TypeScript",
        category: Some("language"),
    },
    NormalizationRule {
        patterns: &[r"(?i)^javascript$", r"(?i)^js$", r"(?i)^es\d{1,4}$"],
        canonical: "JavaScript",
        category: Some("language"),
    },
    NormalizationRule {
        patterns: &[r"(?i)^python\d?$"],
        canonical: "Python",
        category: Some("language"),
    },
    NormalizationRule {
        patterns: &[r"(?i)^rust(lang)?$"],
        canonical: "Rust",
        category: Some("language"),
    },
    NormalizationRule {
        patterns: &[r"(?i)^go(lang)?$"],
        canonical: "Go",
        category: Some("language"),
    },
    NormalizationRule {
        patterns: &[r"(?i)^ruby$"],
        canonical: "Ruby",
        category: Some("language"),
    },
    // --- Infrastructure / Cloud --------------------------------------------
    NormalizationRule {
        patterns: &[r"(?i)^kubernetes$", r"(?i)^k8s$"],
        canonical: "Kubernetes",
        category: Some("infra"),
    },
    NormalizationRule {
        patterns: &[r"(?i)^docker$"],
        canonical: "Docker",
        category: Some("infra"),
    },
    NormalizationRule {
        patterns: &[r"(?i)^aws$", r"(?i)amazon\s+web\s+services"],
        canonical: "AWS",
        category: Some("cloud"),
    },
    NormalizationRule {
        patterns: &[r"(?i)^gcp$", r"(?i)google\s+cloud"],
        canonical: "Google Cloud",
        category: Some("cloud"),
    },
    NormalizationRule {
        patterns: &[r"(?i)^azure$"],
        canonical: "Azure",
        category: Some("cloud"),
    },
    // --- Tools / Web -------------------------------------------------------
    NormalizationRule {
        patterns: &[r"(?i)^github(\s*actions)?$"],
        canonical: "GitHub",
        category: Some("tool"),
    },
    NormalizationRule {
        patterns: &[r"(?i)^git$"],
        canonical: "Git",
        category: Some("tool"),
    },
    NormalizationRule {
        patterns: &[r"(?i)^graphql$"],
        canonical: "GraphQL",
        category: Some("web"),
    },
    // Deliberately after GraphQL: the generic REST pattern must not shadow
    // more specific API rules.
    NormalizationRule {
        patterns: &[r"(?i)^rest(ful)?([\s_-]*api)?$"],
        canonical: "REST API",
        category: Some("web"),
    },
    // --- Databases ---------------------------------------------------------
    NormalizationRule {
        patterns: &[r"(?i)^postgres(ql)?$"],
        canonical: "PostgreSQL",
        category: Some("database"),
    },
    NormalizationRule {
        patterns: &[r"(?i)^mysql$"],
        canonical: "MySQL",
        category: Some("database"),
    },
    NormalizationRule {
        patterns: &[r"(?i)^redis$"],
        canonical: "Redis",
        category: Some("database"),
    },
    // --- Security ----------------------------------------------------------
    NormalizationRule {
        patterns: &[r"(?i)^security$", r"セキュリティ", r"脆弱性"],
        canonical: "セキュリティ",
        category: Some("security"),
    },
];

struct CompiledRule {
    patterns: Vec<Regex>,
    canonical: &'static str,
    category: Option<&'static str>,
}

static COMPILED_RULES: Lazy<Vec<CompiledRule>> = Lazy::new(|| {
    RULE_TABLE
        .iter()
        .map(|rule| CompiledRule {
            patterns: rule
                .patterns
                .iter()
                .map(|pattern| Regex::new(pattern).expect("invalid tag rule pattern"))
                .collect(),
            canonical: rule.canonical,
            category: rule.category,
        })
        .collect()
});

/// Fallback for tags no rule covers: collapse whitespace, underscores to
/// hyphens, and capitalize the first character unless the token already
/// looks like an acronym or a CamelCase product name.
fn basic_normalize(tag: &str) -> String {
    let collapsed = tag.split_whitespace().collect::<Vec<_>>().join(" ");
    let hyphenated = collapsed.replace('_', "-");

    let is_acronym = hyphenated.chars().all(|c| !c.is_lowercase())
        && hyphenated.chars().any(|c| c.is_uppercase());
    if is_acronym {
        return hyphenated;
    }

    let leading_uppercase = hyphenated.chars().take(2).filter(|c| c.is_uppercase()).count();
    if leading_uppercase >= 2 {
        return hyphenated;
    }

    let mut chars = hyphenated.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => hyphenated,
    }
}

/// Normalize one raw tag via the rule table, falling back to
/// [`basic_normalize`] when no rule matches.
pub fn normalize(raw_tag: &str) -> NormalizedTag {
    let trimmed = raw_tag.trim();
    for rule in COMPILED_RULES.iter() {
        if rule.patterns.iter().any(|pattern| pattern.is_match(trimmed)) {
            return NormalizedTag {
                name: rule.canonical.to_string(),
                category: rule.category.map(str::to_string),
            };
        }
    }
    NormalizedTag {
        name: basic_normalize(trimmed),
        category: None,
    }
}

/// Normalize a tag list, de-duplicating by canonical name in first-seen
/// order.
pub fn normalize_tags<S: AsRef<str>>(raw_tags: &[S]) -> Vec<NormalizedTag> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut result = Vec::new();
    for raw in raw_tags {
        let tag = normalize(raw.as_ref());
        if tag.name.is_empty() {
            continue;
        }
        if seen.insert(tag.name.clone()) {
            result.push(tag);
        }
    }
    result
}

/// First non-empty category in tag-list order.
pub fn infer_category(tags: &[NormalizedTag]) -> Option<String> {
    tags.iter().find_map(|tag| tag.category.clone())
}
