//! Content enrichment: a priority-ordered registry of extraction adapters.
//!
//! The first adapter whose URL predicate matches handles the page; the
//! catch-all generic adapter sits last so site-specific rules take
//! precedence. Enrichment never throws: terminal failure is `None` and the
//! caller keeps whatever content it already had.

pub mod adapter;
pub mod model;
pub mod sanitize;
pub mod sites;
pub mod thumbnail;

pub use adapter::{Adapter, GenericAdapter, JsonLdAdapter, SiteRule};
pub use model::EnrichedContent;

use crate::fetcher::Fetcher;
use std::sync::Arc;
use tracing::{debug, instrument};

pub struct ExtractorRegistry {
    adapters: Vec<Box<dyn Adapter>>,
}

impl ExtractorRegistry {
    /// Build the registry from the static site-rule table plus the bespoke
    /// JSON-LD adapter. The JSON-LD adapter is inserted before the generic
    /// rules so its hosts are not swallowed by the catch-all.
    pub fn new(fetcher: Arc<Fetcher>) -> Self {
        let mut adapters: Vec<Box<dyn Adapter>> = Vec::with_capacity(sites::SITE_RULES.len() + 1);
        adapters.push(Box::new(JsonLdAdapter::new(
            sites::JSONLD_HOSTS,
            Arc::clone(&fetcher),
        )));
        for rule in sites::SITE_RULES {
            adapters.push(Box::new(GenericAdapter::new(
                rule.clone(),
                Arc::clone(&fetcher),
            )));
        }
        Self { adapters }
    }

    /// Registry over an explicit adapter list; the test seam.
    pub fn with_adapters(adapters: Vec<Box<dyn Adapter>>) -> Self {
        Self { adapters }
    }

    /// First adapter whose predicate matches, or `None` when nothing does
    /// (only possible for a registry built without the catch-all).
    pub fn select_adapter(&self, url: &str) -> Option<&dyn Adapter> {
        self.adapters
            .iter()
            .map(AsRef::as_ref)
            .find(|adapter| adapter.can_handle(url))
    }

    /// Enrich `url` via the first matching adapter.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn enrich(&self, url: &str) -> Option<EnrichedContent> {
        let adapter = self.select_adapter(url)?;
        debug!(adapter = adapter.name(), "adapter selected");
        adapter.enrich(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sleeper::RecordingSleeper;

    fn registry() -> ExtractorRegistry {
        let fetcher = Arc::new(Fetcher::new().with_sleeper(Arc::new(RecordingSleeper::new())));
        ExtractorRegistry::new(fetcher)
    }

    #[test]
    fn specific_adapter_takes_precedence() {
        let registry = registry();
        let adapter = registry
            .select_adapter("https://qiita.com/user/items/abc")
            .unwrap();
        assert_eq!(adapter.name(), "qiita");
    }

    #[test]
    fn unknown_host_falls_to_generic() {
        let registry = registry();
        let adapter = registry
            .select_adapter("https://unknown-blog.example.org/post/1")
            .unwrap();
        assert_eq!(adapter.name(), "generic");
    }

    #[test]
    fn jsonld_hosts_route_to_bespoke_adapter() {
        let registry = registry();
        let adapter = registry
            .select_adapter("https://news.yahoo.co.jp/articles/xyz")
            .unwrap();
        assert_eq!(adapter.name(), "jsonld");
    }

    #[test]
    fn malformed_url_still_selects_catch_all_without_panic() {
        let registry = registry();
        let adapter = registry.select_adapter("::not a url::").unwrap();
        // Host predicates all decline; only the catch-all matches.
        assert_eq!(adapter.name(), "generic");
    }
}
