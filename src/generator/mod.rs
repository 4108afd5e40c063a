//! Quality-gated summary generation.
//!
//! Orchestrates preprocessing → external API call → parse/validate →
//! post-process → score, retrying until the output clears the quality gate
//! or the attempt budget runs out. The service holds only the API client
//! and is safe to share across concurrent runs.

pub mod api;
pub mod errors;
pub mod parser;
pub mod postprocess;
pub mod prompt;
pub mod types;

pub use api::{GeminiClient, TextGenerator};
pub use errors::GenerationError;
pub use prompt::SkipReason;
pub use types::{GenerationOptions, SourceInfo, SummaryResult};

use crate::config::Config;
use crate::scoring::{self, ScorableArticle};
use crate::sleeper::{Sleeper, TokioSleeper};
use crate::tags;
use prompt::{Preprocessed, PromptPlan};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use types::{ARTICLE_TYPE_UNIFIED, DETAIL_SKIPPED_SENTINEL, SUMMARY_VERSION};

/// Outcome of a generation call. A skip is a deliberate signal, not a
/// failure: the external API was never called and the caller should leave
/// the article unsummarized.
#[derive(Debug)]
pub enum GenerationOutcome {
    Summary(SummaryResult),
    Skipped(SkipReason),
}

pub struct GenerationService {
    api: Arc<dyn TextGenerator>,
    sleeper: Arc<dyn Sleeper>,
}

impl GenerationService {
    pub fn new(api: Arc<dyn TextGenerator>) -> Self {
        Self {
            api,
            sleeper: Arc::new(TokioSleeper),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(GeminiClient::new(config)))
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Generate a summary bundle for one article.
    ///
    /// Validation failures and quality-gate misses consume attempts like any
    /// other error; once the budget is exhausted the last error is embedded
    /// in [`GenerationError::Exhausted`].
    #[instrument(skip(self, content), fields(title = %title))]
    pub async fn generate(
        &self,
        title: &str,
        content: Option<&str>,
        options: Option<GenerationOptions>,
        source: Option<&SourceInfo>,
    ) -> Result<GenerationOutcome, GenerationError> {
        let options = options.unwrap_or_default();

        let plan = match prompt::preprocess(title, content, source, &options) {
            Preprocessed::Skip(reason) => {
                info!(?reason, "skipping generation");
                return Ok(GenerationOutcome::Skipped(reason));
            }
            Preprocessed::Ready(plan) => plan,
        };

        let mut last_error: Option<GenerationError> = None;
        for attempt in 1..=options.max_retries {
            match self.attempt(title, &plan, source, &options).await {
                Ok(result) => {
                    info!(attempt, score = result.quality_score, "summary accepted");
                    return Ok(GenerationOutcome::Summary(result));
                }
                Err(error) => {
                    warn!(attempt, error = %error, "generation attempt failed");
                    if attempt < options.max_retries {
                        let delay = if error.looks_rate_limited() {
                            options.retry_delay * 3
                        } else {
                            options.retry_delay
                        };
                        self.sleeper.sleep(delay).await;
                    }
                    last_error = Some(error);
                }
            }
        }

        Err(GenerationError::Exhausted {
            attempts: options.max_retries,
            last_error: last_error
                .map(|error| error.to_string())
                .unwrap_or_else(|| "no attempts executed".to_string()),
        })
    }

    async fn attempt(
        &self,
        title: &str,
        plan: &PromptPlan,
        source: Option<&SourceInfo>,
        options: &GenerationOptions,
    ) -> Result<SummaryResult, GenerationError> {
        let raw = self.api.generate_text(&plan.prompt).await?;

        if plan.skip_detailed_summary {
            // Short-content path: no detailed summary was requested and the
            // quality gate does not apply.
            let (summary, raw_tags) = parser::extract_summary_only(&raw).ok_or_else(|| {
                GenerationError::Validation("summary line missing from response".to_string())
            })?;
            let normalized = tags::normalize_tags(&raw_tags);
            let category = tags::infer_category(&normalized);
            return Ok(SummaryResult {
                summary,
                detailed_summary: DETAIL_SKIPPED_SENTINEL.to_string(),
                tags: normalized.into_iter().map(|tag| tag.name).collect(),
                category,
                article_type: ARTICLE_TYPE_UNIFIED,
                summary_version: SUMMARY_VERSION,
                quality_score: 100,
            });
        }

        let parsed = parser::parse(&raw);
        if !parser::validate(&parsed) {
            return Err(GenerationError::Validation(
                "response has no valid bulleted items".to_string(),
            ));
        }

        let (summary, detailed_summary) =
            postprocess::post_process_summaries(&parsed.summary, &parsed.detailed_summary);

        let normalized = tags::normalize_tags(&parsed.tags);
        let category = parsed
            .category
            .clone()
            .or_else(|| tags::infer_category(&normalized));
        let tag_names: Vec<String> = normalized.into_iter().map(|tag| tag.name).collect();

        let quality_score = scoring::score(&ScorableArticle {
            title: title.to_string(),
            summary: Some(summary.clone()),
            tags: tag_names.clone(),
            source_name: source.and_then(|s| s.source_name.clone()),
            ..ScorableArticle::default()
        });

        if quality_score < options.min_quality_score {
            return Err(GenerationError::QualityGate {
                score: quality_score,
                minimum: options.min_quality_score,
            });
        }

        Ok(SummaryResult {
            summary,
            detailed_summary,
            tags: tag_names,
            category,
            article_type: ARTICLE_TYPE_UNIFIED,
            summary_version: SUMMARY_VERSION,
            quality_score,
        })
    }
}
