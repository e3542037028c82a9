//! Assembly of enriched documents from chunks and generated context.

use serde_json::{Map, Value};

use crate::types::{Chunk, ContextResult, DocumentMetadata, EnrichedDocument};

/// Merge a chunk with its generated context into the final document.
///
/// Deterministic: content is `prefix + context + separator + chunk` when a
/// non-empty context was produced, otherwise the chunk verbatim. Metadata
/// always records the chunk's index and exact original text; the context
/// key is omitted entirely when empty so downstream consumers never treat
/// `""` as a real context.
pub fn assemble(
    chunk: &Chunk,
    context: &ContextResult,
    prefix: &str,
    separator: &str,
    seed_metadata: Map<String, Value>,
) -> EnrichedDocument {
    let has_context = context.has_context();

    let content = if has_context {
        format!("{prefix}{}{separator}{}", context.text, chunk.content)
    } else {
        chunk.content.clone()
    };

    let metadata = DocumentMetadata {
        chunk_index: chunk.index,
        original_chunk: chunk.content.clone(),
        has_context,
        context: has_context.then(|| context.text.clone()),
        seed: seed_metadata,
    };

    EnrichedDocument::new(content, metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seed() -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("source".to_string(), json!("notes.md"));
        map
    }

    #[test]
    fn test_assemble_with_context() {
        let chunk = Chunk::new("BBBB", 1);
        let context = ContextResult::success("CTX");
        let doc = assemble(&chunk, &context, "Context: ", "\n\n", seed());

        assert_eq!(doc.content, "Context: CTX\n\nBBBB");
        assert_eq!(doc.metadata.chunk_index, 1);
        assert_eq!(doc.metadata.original_chunk, "BBBB");
        assert!(doc.metadata.has_context);
        assert_eq!(doc.metadata.context.as_deref(), Some("CTX"));
        assert_eq!(doc.metadata.seed["source"], json!("notes.md"));
    }

    #[test]
    fn test_assemble_after_failed_generation() {
        let chunk = Chunk::new("chunk text", 0);
        let context = ContextResult::failed();
        let doc = assemble(&chunk, &context, "Context: ", "\n\n", Map::new());

        assert_eq!(doc.content, "chunk text");
        assert!(!doc.metadata.has_context);
        assert!(doc.metadata.context.is_none());
    }

    #[test]
    fn test_assemble_with_empty_successful_context() {
        let chunk = Chunk::new("chunk text", 0);
        let context = ContextResult::success("");
        let doc = assemble(&chunk, &context, "Context: ", "\n\n", Map::new());

        assert_eq!(doc.content, "chunk text");
        assert!(!doc.metadata.has_context);
        assert!(doc.metadata.context.is_none());
    }

    #[test]
    fn test_custom_prefix_and_separator() {
        let chunk = Chunk::new("body", 3);
        let context = ContextResult::success("summary");
        let doc = assemble(&chunk, &context, ">> ", " | ", Map::new());

        assert_eq!(doc.content, ">> summary | body");
    }
}
