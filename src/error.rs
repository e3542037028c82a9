//! Error types for the enrichment pipeline.

use thiserror::Error;

/// Fatal pipeline errors surfaced before any model call is made.
///
/// Per-chunk model failures are not represented here: they are retried and
/// then degrade to uncontextualized chunks instead of propagating.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The pipeline cannot start with the given configuration.
    #[error("invalid pipeline configuration: {0}")]
    Configuration(String),

    /// The base metadata option was not a valid JSON object.
    #[error("invalid JSON in metadata field: {0}")]
    Metadata(#[from] serde_json::Error),
}

impl PipelineError {
    /// Shorthand for a configuration error with a formatted message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}
