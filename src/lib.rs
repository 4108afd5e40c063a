pub mod config;
pub mod display;
pub mod extractor;
pub mod fetcher;
pub mod generator;
pub mod pipeline;
pub mod scoring;
pub mod sleeper;
pub mod tags;

pub use extractor::{EnrichedContent, ExtractorRegistry};
pub use generator::{GenerationOutcome, GenerationService};
pub use pipeline::{Pipeline, RawArticle};
