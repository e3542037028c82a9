//! Prompt construction for context generation.

/// Placeholder replaced with the whole document's text.
pub const DOCUMENT_PLACEHOLDER: &str = "{document}";

/// Placeholder replaced with the chunk's text.
pub const CHUNK_PLACEHOLDER: &str = "{chunk}";

/// Build the prompt sent to the model for one chunk.
///
/// Two construction policies, selected by the template itself:
///
/// - A template containing the literal `{document}` or `{chunk}` tokens is
///   filled in verbatim, with full control over framing.
/// - Any other template is treated as an instruction suffix: the document
///   and chunk are wrapped in fixed delimiting markup and the template is
///   appended after them.
///
/// Pure function, no side effects.
pub fn build_prompt(document_text: &str, chunk_text: &str, template: &str) -> String {
    if template.contains(DOCUMENT_PLACEHOLDER) || template.contains(CHUNK_PLACEHOLDER) {
        return template
            .replace(DOCUMENT_PLACEHOLDER, document_text)
            .replace(CHUNK_PLACEHOLDER, chunk_text);
    }

    format!(
        "<document>\n{document_text}\n</document>\n\nHere is the chunk we want to situate within the whole document:\n<chunk>\n{chunk_text}\n</chunk>\n\n{template}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wrap_policy_format() {
        let prompt = build_prompt("full document", "one chunk", "Situate this chunk.");
        assert_eq!(
            prompt,
            "<document>\nfull document\n</document>\n\nHere is the chunk we want to situate within the whole document:\n<chunk>\none chunk\n</chunk>\n\nSituate this chunk."
        );
    }

    #[test]
    fn test_placeholder_policy() {
        let prompt = build_prompt(
            "DOC",
            "CHUNK",
            "Document:\n{document}\nChunk:\n{chunk}\nGo.",
        );
        assert_eq!(prompt, "Document:\nDOC\nChunk:\nCHUNK\nGo.");
    }

    #[test]
    fn test_placeholders_take_precedence() {
        // A single placeholder is enough to switch policies; no wrapping
        // markup is added around it.
        let prompt = build_prompt("DOC", "CHUNK", "Summarize {chunk}");
        assert_eq!(prompt, "Summarize CHUNK");
        assert!(!prompt.contains("<document>"));
    }

    #[test]
    fn test_wrap_policy_with_empty_template() {
        let prompt = build_prompt("d", "c", "");
        assert!(prompt.starts_with("<document>\nd\n</document>"));
        assert!(prompt.ends_with("<chunk>\nc\n</chunk>\n\n"));
    }
}
