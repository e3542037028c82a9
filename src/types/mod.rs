//! Core types for the enrichment service.

mod config;
mod document;
mod record;

pub use config::{PipelineConfig, ServiceConfig, SplitterConfig};
pub use document::{Chunk, ContextResult, DocumentMetadata, EnrichedDocument};
pub use record::InputRecord;
