//! End-to-end convenience entry: enrich thin content from the source page,
//! then generate the summary bundle. Route handlers and batch scripts call
//! this and persist the result themselves.

use crate::extractor::{EnrichedContent, ExtractorRegistry};
use crate::generator::{
    GenerationError, GenerationOptions, GenerationOutcome, GenerationService, SourceInfo,
};
use tracing::{debug, info, instrument};

/// Raw article as delivered by the feed fetchers.
#[derive(Debug, Clone)]
pub struct RawArticle {
    pub title: String,
    pub content: Option<String>,
    pub url: String,
    pub source_name: Option<String>,
}

/// Upstream content at or under this length triggers enrichment.
const ENRICH_THRESHOLD: usize = 300;

#[derive(Debug)]
pub struct PipelineOutput {
    /// Present when enrichment ran and succeeded; the caller merges it into
    /// the article record.
    pub enriched: Option<EnrichedContent>,
    pub outcome: GenerationOutcome,
}

pub struct Pipeline {
    registry: ExtractorRegistry,
    service: GenerationService,
}

impl Pipeline {
    pub fn new(registry: ExtractorRegistry, service: GenerationService) -> Self {
        Self { registry, service }
    }

    /// Enrich (when the upstream content is too short) and summarize one
    /// article. Enrichment failure is not an error: generation proceeds
    /// with whatever content the feed delivered.
    #[instrument(skip(self, article), fields(url = %article.url))]
    pub async fn summarize_article(
        &self,
        article: &RawArticle,
        options: Option<GenerationOptions>,
    ) -> Result<PipelineOutput, GenerationError> {
        let upstream_chars = article
            .content
            .as_deref()
            .map(|content| content.chars().count())
            .unwrap_or(0);

        let enriched = if upstream_chars <= ENRICH_THRESHOLD {
            debug!(upstream_chars, "content too short, attempting enrichment");
            self.registry.enrich(&article.url).await
        } else {
            None
        };

        let content = enriched
            .as_ref()
            .and_then(|e| e.content.as_deref())
            .or(article.content.as_deref());

        if enriched.is_some() {
            info!("enrichment succeeded");
        }

        let source = SourceInfo {
            source_name: article.source_name.clone(),
            url: Some(article.url.clone()),
        };

        let outcome = self
            .service
            .generate(&article.title, content, options, Some(&source))
            .await?;

        Ok(PipelineOutput { enriched, outcome })
    }
}
