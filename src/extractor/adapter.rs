//! Extraction strategies. One generic engine consumes data-driven site
//! rules; truly bespoke strategies (JSON-LD sites) get their own adapter
//! types. Adapters never propagate errors: terminal failure is `None`.

use crate::extractor::model::EnrichedContent;
use crate::extractor::sanitize::{extract_by_selectors, fallback_extract};
use crate::extractor::thumbnail::extract_thumbnail;
use crate::fetcher::{FetchError, Fetcher, PageResponse};
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use url::Url;

/// Default minimum extracted-content length in characters.
pub const DEFAULT_MIN_CONTENT_LENGTH: usize = 500;

/// Declarative description of how to extract one site. Adding a source is a
/// data change, not a new type.
#[derive(Debug, Clone)]
pub struct SiteRule {
    pub name: &'static str,
    /// Host suffixes this rule handles; empty means "match every URL"
    /// (the catch-all rule, which must be last in the table).
    pub host_suffixes: &'static [&'static str],
    /// Content selectors tried in priority order.
    pub selectors: &'static [&'static str],
    /// Minimum character count for extraction to succeed.
    pub min_content_length: usize,
    /// Site-specific container tried between `main` and `body` in the
    /// fallback chain.
    pub fallback_container: Option<&'static str>,
    /// Slide/video hosts where a thumbnail alone is a useful result.
    pub thumbnail_only: bool,
}

#[async_trait]
pub trait Adapter: Send + Sync {
    fn name(&self) -> &str;

    /// Must not panic on malformed URLs.
    fn can_handle(&self, url: &str) -> bool;

    /// `None` means no enrichment available; adapters never surface errors.
    async fn enrich(&self, url: &str) -> Option<EnrichedContent>;
}

fn host_matches(url: &str, suffixes: &[&str]) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    suffixes
        .iter()
        .any(|suffix| host == *suffix || host.ends_with(&format!(".{suffix}")))
}

/// Generic extraction engine driven by a [`SiteRule`].
pub struct GenericAdapter {
    rule: SiteRule,
    fetcher: Arc<Fetcher>,
}

impl GenericAdapter {
    pub fn new(rule: SiteRule, fetcher: Arc<Fetcher>) -> Self {
        Self { rule, fetcher }
    }

    fn extract(&self, response: &PageResponse) -> Option<EnrichedContent> {
        let document = Html::parse_document(&response.body_utf8);
        let thumbnail = extract_thumbnail(&document, &response.url_final);

        if self.rule.thumbnail_only {
            return thumbnail.map(|thumbnail| EnrichedContent {
                content: None,
                thumbnail: Some(thumbnail),
            });
        }

        let min = self.rule.min_content_length;
        let content = extract_by_selectors(&document, self.rule.selectors, min).or_else(|| {
            fallback_extract(&document, self.rule.fallback_container)
                .filter(|text| text.chars().count() > min)
        });

        match content {
            Some(content) => Some(EnrichedContent {
                content: Some(content),
                thumbnail,
            }),
            None => {
                debug!(adapter = self.rule.name, "content below minimum length");
                None
            }
        }
    }
}

#[async_trait]
impl Adapter for GenericAdapter {
    fn name(&self) -> &str {
        self.rule.name
    }

    fn can_handle(&self, url: &str) -> bool {
        if self.rule.host_suffixes.is_empty() {
            return true; // catch-all
        }
        host_matches(url, self.rule.host_suffixes)
    }

    #[instrument(skip(self), fields(adapter = self.rule.name, url = %url))]
    async fn enrich(&self, url: &str) -> Option<EnrichedContent> {
        let response = match self.fetcher.fetch(url).await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "fetch failed, no enrichment");
                return None;
            }
        };
        self.extract(&response)
    }
}

/// Bespoke adapter for news sites that embed the article body in
/// `application/ld+json` structured data rather than stable markup.
pub struct JsonLdAdapter {
    hosts: &'static [&'static str],
    min_content_length: usize,
    fetcher: Arc<Fetcher>,
}

impl JsonLdAdapter {
    pub fn new(hosts: &'static [&'static str], fetcher: Arc<Fetcher>) -> Self {
        Self {
            hosts,
            min_content_length: DEFAULT_MIN_CONTENT_LENGTH,
            fetcher,
        }
    }

    fn extract(&self, response: &PageResponse) -> Option<EnrichedContent> {
        let document = Html::parse_document(&response.body_utf8);
        let thumbnail = extract_thumbnail(&document, &response.url_final);

        let selector = Selector::parse("script[type='application/ld+json']").ok()?;
        for element in document.select(&selector) {
            let raw = element.text().collect::<String>();
            let Ok(value) = serde_json::from_str::<serde_json::Value>(&raw) else {
                continue;
            };
            if let Some(body) = find_article_body(&value) {
                let body = crate::extractor::model::normalize_whitespace(&body);
                if body.chars().count() > self.min_content_length {
                    return Some(EnrichedContent {
                        content: Some(body),
                        thumbnail,
                    });
                }
            }
        }

        // Structured data missing or thin; fall back to broad containers.
        let content = fallback_extract(&document, None)
            .filter(|text| text.chars().count() > self.min_content_length)?;
        Some(EnrichedContent {
            content: Some(content),
            thumbnail,
        })
    }
}

/// Walk a JSON-LD document (object, array, or @graph) for an `articleBody`.
fn find_article_body(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Object(map) => {
            if let Some(body) = map.get("articleBody").and_then(|v| v.as_str()) {
                return Some(body.to_string());
            }
            if let Some(graph) = map.get("@graph") {
                return find_article_body(graph);
            }
            None
        }
        serde_json::Value::Array(items) => items.iter().find_map(find_article_body),
        _ => None,
    }
}

#[async_trait]
impl Adapter for JsonLdAdapter {
    fn name(&self) -> &str {
        "jsonld"
    }

    fn can_handle(&self, url: &str) -> bool {
        host_matches(url, self.hosts)
    }

    #[instrument(skip(self), fields(adapter = "jsonld", url = %url))]
    async fn enrich(&self, url: &str) -> Option<EnrichedContent> {
        let response = match self.fetcher.fetch(url).await {
            Ok(response) => response,
            Err(err) => {
                if !matches!(err, FetchError::UnsupportedContentType(_)) {
                    warn!(error = %err, "fetch failed, no enrichment");
                }
                return None;
            }
        };
        self.extract(&response)
    }
}
