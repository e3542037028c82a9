//! Configuration types for the enrichment pipeline.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PipelineError;
use crate::{
    DEFAULT_BATCH_SIZE, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, DEFAULT_CONTEXT_PREFIX,
    DEFAULT_CONTEXT_PROMPT, DEFAULT_CONTEXT_SEPARATOR, DEFAULT_MAX_RETRIES,
};

/// Encodings accepted by the token-count strategy.
const KNOWN_ENCODINGS: [&str; 4] = ["cl100k_base", "p50k_base", "p50k_edit", "r50k_base"];

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_chunk_overlap() -> usize {
    DEFAULT_CHUNK_OVERLAP
}

fn default_separator() -> String {
    "\n\n".to_string()
}

/// Splitting strategy selection with its strategy-specific parameters.
///
/// Each variant carries only the options that strategy understands, so a
/// configuration cannot mix, say, an encoding name into a separator-based
/// split. Resolved and validated once, before any document is processed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum SplitterConfig {
    /// Fixed single-separator splitting
    #[serde(rename_all = "camelCase")]
    Character {
        #[serde(default = "default_chunk_size")]
        chunk_size: usize,
        #[serde(default = "default_chunk_overlap")]
        chunk_overlap: usize,
        #[serde(default = "default_separator")]
        separator: String,
        #[serde(default)]
        keep_separator: bool,
    },

    /// Multi-separator splitting with a fallback cascade
    #[serde(rename_all = "camelCase")]
    Recursive {
        #[serde(default = "default_chunk_size")]
        chunk_size: usize,
        #[serde(default = "default_chunk_overlap")]
        chunk_overlap: usize,
        #[serde(default)]
        separators: Option<Vec<String>>,
    },

    /// Fixed-size token windows over a tiktoken encoding
    #[serde(rename_all = "camelCase")]
    TokenCount {
        #[serde(default = "default_chunk_size")]
        chunk_size: usize,
        #[serde(default = "default_chunk_overlap")]
        chunk_overlap: usize,
        #[serde(default)]
        encoding: Option<String>,
    },

    /// Markdown-structure-aware splitting
    #[serde(rename_all = "camelCase")]
    Markdown {
        #[serde(default = "default_chunk_size")]
        chunk_size: usize,
        #[serde(default = "default_chunk_overlap")]
        chunk_overlap: usize,
    },
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self::Recursive {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            separators: None,
        }
    }
}

impl SplitterConfig {
    /// Name of the selected strategy.
    pub fn strategy_name(&self) -> &'static str {
        match self {
            Self::Character { .. } => "character",
            Self::Recursive { .. } => "recursive",
            Self::TokenCount { .. } => "token_count",
            Self::Markdown { .. } => "markdown",
        }
    }

    /// Maximum chunk length for this strategy.
    pub fn chunk_size(&self) -> usize {
        match self {
            Self::Character { chunk_size, .. }
            | Self::Recursive { chunk_size, .. }
            | Self::TokenCount { chunk_size, .. }
            | Self::Markdown { chunk_size, .. } => *chunk_size,
        }
    }

    /// Overlap between adjacent chunks for this strategy.
    pub fn chunk_overlap(&self) -> usize {
        match self {
            Self::Character { chunk_overlap, .. }
            | Self::Recursive { chunk_overlap, .. }
            | Self::TokenCount { chunk_overlap, .. }
            | Self::Markdown { chunk_overlap, .. } => *chunk_overlap,
        }
    }

    /// Check this configuration before any document is processed.
    ///
    /// Splitting never fails mid-document; anything that would make the
    /// strategy unconstructible is rejected here instead.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.chunk_size() == 0 {
            return Err(PipelineError::config("chunk size must be at least 1"));
        }

        if self.chunk_overlap() >= self.chunk_size() {
            return Err(PipelineError::config(format!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                self.chunk_overlap(),
                self.chunk_size()
            )));
        }

        match self {
            Self::Character { separator, .. } => {
                if separator.is_empty() {
                    return Err(PipelineError::config(
                        "character splitter separator must not be empty",
                    ));
                }
            }
            Self::Recursive { separators, .. } => {
                if let Some(separators) = separators {
                    if separators.is_empty() {
                        return Err(PipelineError::config(
                            "recursive splitter separator list must not be empty",
                        ));
                    }
                    if separators.iter().any(String::is_empty) {
                        return Err(PipelineError::config(
                            "recursive splitter separators must not contain empty strings",
                        ));
                    }
                }
            }
            Self::TokenCount { encoding, .. } => {
                if let Some(encoding) = encoding {
                    if !KNOWN_ENCODINGS.contains(&encoding.as_str()) {
                        return Err(PipelineError::config(format!(
                            "unknown token encoding '{encoding}', expected one of: {}",
                            KNOWN_ENCODINGS.join(", ")
                        )));
                    }
                }
            }
            Self::Markdown { .. } => {}
        }

        Ok(())
    }
}

/// Immutable configuration for one enrichment run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineConfig {
    /// Instruction appended to every context-generation prompt, or a
    /// template containing `{document}` / `{chunk}` placeholders
    #[serde(alias = "contextPromptTemplate")]
    pub context_prompt: String,

    /// Prefix placed before the generated context
    pub context_prefix: String,

    /// Separator between the generated context and the chunk content
    pub context_separator: String,

    /// Number of chunks enriched in parallel per window
    pub batch_size: usize,

    /// Total model attempts per chunk (minimum one attempt is always made)
    pub max_retries: usize,

    /// Base metadata added to every output document
    pub metadata: Map<String, Value>,

    /// Splitting strategy and its parameters
    pub splitter: SplitterConfig,

    /// When false, chunks pass through unenriched and no model is required
    pub enable_contextual_retrieval: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            context_prompt: DEFAULT_CONTEXT_PROMPT.to_string(),
            context_prefix: DEFAULT_CONTEXT_PREFIX.to_string(),
            context_separator: DEFAULT_CONTEXT_SEPARATOR.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            max_retries: DEFAULT_MAX_RETRIES,
            metadata: Map::new(),
            splitter: SplitterConfig::default(),
            enable_contextual_retrieval: true,
        }
    }
}

impl PipelineConfig {
    /// Set the splitting strategy.
    pub fn with_splitter(mut self, splitter: SplitterConfig) -> Self {
        self.splitter = splitter;
        self
    }

    /// Set the window size for parallel context generation.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the total model attempts per chunk.
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the base metadata added to every output document.
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Set the base metadata from a JSON object string.
    ///
    /// Anything other than a JSON object is a configuration error,
    /// surfaced before the run starts.
    pub fn with_metadata_json(mut self, json: &str) -> Result<Self, PipelineError> {
        self.metadata = serde_json::from_str(json)?;
        Ok(self)
    }

    /// Check this configuration before the run starts.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.batch_size == 0 {
            return Err(PipelineError::config("batch size must be at least 1"));
        }

        self.splitter.validate()
    }
}

/// Process-level configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL of the model service, when one is configured
    pub model_service_url: Option<String>,

    /// Model identifier forwarded to the model service
    pub model_name: Option<String>,

    /// Default chunk size for requests that do not specify one
    pub default_chunk_size: usize,

    /// Default chunk overlap for requests that do not specify one
    pub default_chunk_overlap: usize,

    /// Default window size for parallel context generation
    pub default_batch_size: usize,

    /// Default total model attempts per chunk
    pub default_max_retries: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            model_service_url: None,
            model_name: None,
            default_chunk_size: DEFAULT_CHUNK_SIZE,
            default_chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            default_batch_size: DEFAULT_BATCH_SIZE,
            default_max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            model_service_url: std::env::var("MODEL_SERVICE_URL").ok(),
            model_name: std::env::var("MODEL_NAME").ok(),
            default_chunk_size: std::env::var("CHUNK_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_CHUNK_SIZE),
            default_chunk_overlap: std::env::var("CHUNK_OVERLAP")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_CHUNK_OVERLAP),
            default_batch_size: std::env::var("BATCH_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_BATCH_SIZE),
            default_max_retries: std::env::var("MAX_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_RETRIES),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.context_prefix, "Context: ");
        assert_eq!(config.context_separator, "\n\n");
        assert_eq!(config.batch_size, 10);
        assert_eq!(config.max_retries, 3);
        assert!(config.enable_contextual_retrieval);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_metadata_json_parsing() {
        let config = PipelineConfig::default()
            .with_metadata_json(r#"{"tenant": "acme"}"#)
            .unwrap();
        assert_eq!(config.metadata["tenant"], serde_json::json!("acme"));

        assert!(PipelineConfig::default().with_metadata_json("{oops").is_err());
        assert!(PipelineConfig::default().with_metadata_json("[1, 2]").is_err());
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let config = PipelineConfig::default().with_batch_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let config = SplitterConfig::Markdown {
            chunk_size: 0,
            chunk_overlap: 0,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overlap_must_be_smaller_than_size() {
        let config = SplitterConfig::TokenCount {
            chunk_size: 100,
            chunk_overlap: 100,
            encoding: None,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_separator_list_rejected() {
        let config = SplitterConfig::Recursive {
            chunk_size: 100,
            chunk_overlap: 0,
            separators: Some(vec![]),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_encoding_rejected() {
        let config = SplitterConfig::TokenCount {
            chunk_size: 100,
            chunk_overlap: 0,
            encoding: Some("o200k_base".to_string()),
        };
        assert!(config.validate().is_err());

        let config = SplitterConfig::TokenCount {
            chunk_size: 100,
            chunk_overlap: 0,
            encoding: Some("p50k_base".to_string()),
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_splitter_config_wire_format() {
        let json = r#"{"strategy": "character", "chunkSize": 5, "chunkOverlap": 0, "separator": " "}"#;
        let config: SplitterConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.strategy_name(), "character");
        assert_eq!(config.chunk_size(), 5);

        let json = r#"{"strategy": "token_count"}"#;
        let config: SplitterConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.chunk_size(), crate::DEFAULT_CHUNK_SIZE);
    }
}
