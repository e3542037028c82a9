//! Chunk and enriched document types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A contiguous piece of a document's text produced by a splitter.
///
/// The index records the chunk's position within its record's split and is
/// preserved end-to-end: output documents are always ordered by it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The chunk text
    pub content: String,

    /// Position of this chunk within its record's split (0-indexed)
    pub index: usize,
}

impl Chunk {
    /// Create a chunk at the given split position.
    pub fn new(content: impl Into<String>, index: usize) -> Self {
        Self {
            content: content.into(),
            index,
        }
    }

    /// Number the given chunk texts in split order.
    pub fn from_split(texts: Vec<String>) -> Vec<Self> {
        texts
            .into_iter()
            .enumerate()
            .map(|(index, content)| Self { content, index })
            .collect()
    }
}

/// Outcome of generating context for one chunk.
///
/// An empty text on a successful invocation still counts as success; only
/// exhausted retries produce a failed result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextResult {
    /// The generated context, empty when generation failed
    pub text: String,

    /// Whether the model produced a reply before retries were exhausted
    pub succeeded: bool,
}

impl ContextResult {
    /// A successful generation with the given context text.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            succeeded: true,
        }
    }

    /// A generation that exhausted its retries.
    pub fn failed() -> Self {
        Self {
            text: String::new(),
            succeeded: false,
        }
    }

    /// Whether a usable (non-empty) context was produced.
    pub fn has_context(&self) -> bool {
        self.succeeded && !self.text.is_empty()
    }
}

/// The final output unit: a chunk combined with its generated context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedDocument {
    /// Unique identifier for this document
    pub id: Uuid,

    /// The indexable content: context prefix + chunk, or the chunk verbatim
    pub content: String,

    /// Provenance metadata carried alongside the content
    pub metadata: DocumentMetadata,

    /// When this document was created
    pub created_at: DateTime<Utc>,
}

/// Metadata attached to every enriched document.
///
/// Serialized with the wire keys downstream consumers expect
/// (`chunkIndex`, `originalChunk`, `hasContext`, `context`); seed metadata
/// from the input record is flattened into the same object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    /// Position of the source chunk within its record's split
    pub chunk_index: usize,

    /// The exact chunk text before any context prefixing
    pub original_chunk: String,

    /// Whether a non-empty context was generated for this chunk
    pub has_context: bool,

    /// The generated context; omitted entirely when none was produced so
    /// consumers never see an empty-string marker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Seed metadata inherited from the input record
    #[serde(flatten)]
    pub seed: Map<String, Value>,
}

impl EnrichedDocument {
    /// Create a document with the given content and metadata.
    pub fn new(content: String, metadata: DocumentMetadata) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            metadata,
            created_at: Utc::now(),
        }
    }
}
