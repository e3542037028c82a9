//! Markdown-structure-aware splitter.

use anyhow::Result;
use lazy_static::lazy_static;
use regex::Regex;

use super::base::TextSplitter;
use super::recursive_splitter::RecursiveSplitter;

lazy_static! {
    /// Matches ATX headings (#, ##, ... ######) at line start.
    static ref HEADING_REGEX: Regex = Regex::new(r"(?m)^#{1,6}\s+\S").unwrap();
}

/// Splitter that respects markdown document structure.
///
/// Cuts the document into heading-delimited sections first, so a chunk
/// never straddles two sections. Sections larger than the budget degrade
/// to the markdown separator cascade.
pub struct MarkdownSplitter {
    chunk_size: usize,
    fallback: RecursiveSplitter,
}

impl MarkdownSplitter {
    /// Create a markdown splitter with the given budgets.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            fallback: RecursiveSplitter::for_markdown(chunk_size, chunk_overlap),
        }
    }

    /// Cut the text into heading-delimited sections.
    fn split_sections<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut starts: Vec<usize> = HEADING_REGEX.find_iter(text).map(|m| m.start()).collect();

        if starts.first() != Some(&0) {
            starts.insert(0, 0);
        }
        starts.push(text.len());

        starts
            .windows(2)
            .map(|window| &text[window[0]..window[1]])
            .filter(|section| !section.trim().is_empty())
            .collect()
    }
}

impl TextSplitter for MarkdownSplitter {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn description(&self) -> &'static str {
        "Splits markdown at heading boundaries, then by structure within sections"
    }

    fn split(&self, text: &str) -> Result<Vec<String>> {
        if text.is_empty() {
            return Ok(vec![]);
        }

        let mut chunks = Vec::new();
        for section in self.split_sections(text) {
            if section.len() <= self.chunk_size {
                chunks.push(section.to_string());
            } else {
                chunks.extend(self.fallback.split(section)?);
            }
        }

        Ok(chunks)
    }
}
