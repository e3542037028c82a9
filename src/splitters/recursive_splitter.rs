//! Recursive splitter with hierarchical separator fallback.

use anyhow::Result;

use super::base::{hard_split, merge_splits, TextSplitter};

/// Default separator cascade, most to least preferred.
const DEFAULT_SEPARATORS: [&str; 8] = ["\n\n", "\n", ". ", "! ", "? ", "; ", ", ", " "];

/// Separator cascade for markdown content.
const MARKDOWN_SEPARATORS: [&str; 8] = [
    "\n\n\n", "\n\n", "\n# ", "\n## ", "\n### ", "\n", ". ", " ",
];

/// Splitter that cuts text hierarchically.
///
/// Tries each separator in order of preference and only descends to a more
/// granular one for pieces that are still too large:
/// 1. Double newlines (paragraphs)
/// 2. Single newlines
/// 3. Sentence endings (. ! ?)
/// 4. Semicolons and commas
/// 5. Spaces (words)
/// 6. Grapheme boundaries (last resort)
pub struct RecursiveSplitter {
    /// Separators in order of preference (most to least preferred)
    separators: Vec<String>,
    chunk_size: usize,
    chunk_overlap: usize,
}

impl RecursiveSplitter {
    /// Create a recursive splitter with the default separator cascade.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            separators: DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
            chunk_size,
            chunk_overlap,
        }
    }

    /// Create a recursive splitter for markdown content.
    pub fn for_markdown(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            separators: MARKDOWN_SEPARATORS.iter().map(|s| s.to_string()).collect(),
            chunk_size,
            chunk_overlap,
        }
    }

    /// Create a recursive splitter with a custom separator cascade.
    pub fn with_separators(
        separators: Vec<String>,
        chunk_size: usize,
        chunk_overlap: usize,
    ) -> Self {
        Self {
            separators,
            chunk_size,
            chunk_overlap,
        }
    }

    /// Recursively split text using the separator hierarchy.
    fn recursive_split(&self, text: &str, separator_index: usize) -> Vec<String> {
        if text.is_empty() {
            return vec![];
        }

        // If text fits in a single chunk, return it
        if text.len() <= self.chunk_size {
            return vec![text.to_string()];
        }

        // If we've exhausted all separators, split on grapheme boundaries
        if separator_index >= self.separators.len() {
            return hard_split(text, self.chunk_size);
        }

        let separator = &self.separators[separator_index];
        let splits: Vec<&str> = text.split(separator.as_str()).collect();

        // If this separator doesn't divide the text, try the next one
        if splits.len() <= 1 {
            return self.recursive_split(text, separator_index + 1);
        }

        // Descend into splits that are still too large, then merge back
        // into chunks within the budget.
        let mut pieces = Vec::with_capacity(splits.len());
        for split in splits {
            if split.len() > self.chunk_size {
                pieces.extend(self.recursive_split(split, separator_index + 1));
            } else {
                pieces.push(split.to_string());
            }
        }

        merge_splits(pieces, separator, self.chunk_size, self.chunk_overlap)
    }
}

impl TextSplitter for RecursiveSplitter {
    fn name(&self) -> &'static str {
        "recursive"
    }

    fn description(&self) -> &'static str {
        "Hierarchically splits text using multiple separator levels"
    }

    fn split(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.recursive_split(text, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_text() {
        let splitter = RecursiveSplitter::new(100, 0);
        let chunks = splitter.split("Hello, world!").unwrap();
        assert_eq!(chunks, vec!["Hello, world!"]);
    }

    #[test]
    fn test_empty_text() {
        let splitter = RecursiveSplitter::new(100, 0);
        assert!(splitter.split("").unwrap().is_empty());
    }

    #[test]
    fn test_paragraph_splitting() {
        let splitter = RecursiveSplitter::new(30, 0);
        let content = "This is paragraph one.\n\nThis is paragraph two.\n\nThis is paragraph three.";
        let chunks = splitter.split(content).unwrap();

        assert!(chunks.len() > 1);
        let total_content: String = chunks.join(" ");
        assert!(total_content.contains("paragraph one"));
        assert!(total_content.contains("paragraph two"));
        assert!(total_content.contains("paragraph three"));
    }

    #[test]
    fn test_sentence_splitting() {
        let splitter = RecursiveSplitter::new(20, 0);
        let content = "First sentence. Second sentence. Third sentence. Fourth sentence.";
        let chunks = splitter.split(content).unwrap();

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.len() <= 20);
        }
        let total_content: String = chunks.join(" ");
        assert!(total_content.contains("First"));
        assert!(total_content.contains("Fourth"));
    }

    #[test]
    fn test_unbroken_text_falls_through_cascade() {
        let splitter = RecursiveSplitter::new(4, 0);
        let chunks = splitter.split("abcdefghij").unwrap();
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 4);
        }
        assert_eq!(chunks.concat(), "abcdefghij");
    }

    #[test]
    fn test_custom_separators() {
        let splitter = RecursiveSplitter::with_separators(vec!["|".to_string()], 3, 0);
        let chunks = splitter.split("aa|bb|cc").unwrap();
        assert_eq!(chunks, vec!["aa", "bb", "cc"]);
    }
}
