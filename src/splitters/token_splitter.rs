//! Token-based splitter for fixed-size token windows.

use anyhow::Result;

use super::base::{TextSplitter, TiktokenCounter, TokenCounter};

/// Splitter that cuts text into fixed-size token windows.
///
/// The most predictable strategy: no semantic boundaries, just token
/// counts. Useful when the downstream embedder has a hard token limit.
pub struct TokenSplitter {
    counter: TiktokenCounter,
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TokenSplitter {
    /// Create a token splitter with the default cl100k_base encoding.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            counter: TiktokenCounter::new(),
            chunk_size,
            chunk_overlap,
        }
    }

    /// Create a token splitter with a specific encoding.
    pub fn with_encoding(
        encoding_name: &str,
        chunk_size: usize,
        chunk_overlap: usize,
    ) -> Result<Self> {
        Ok(Self {
            counter: TiktokenCounter::with_encoding(encoding_name)?,
            chunk_size,
            chunk_overlap,
        })
    }
}

impl TextSplitter for TokenSplitter {
    fn name(&self) -> &'static str {
        "token_count"
    }

    fn description(&self) -> &'static str {
        "Splits text into fixed-size token windows with optional overlap"
    }

    fn split(&self, text: &str) -> Result<Vec<String>> {
        if text.is_empty() {
            return Ok(vec![]);
        }

        let tokens = self.counter.encode(text);
        if tokens.is_empty() {
            return Ok(vec![]);
        }

        let step = if self.chunk_overlap >= self.chunk_size {
            self.chunk_size
        } else {
            self.chunk_size - self.chunk_overlap
        };

        let mut chunks = Vec::new();
        let mut start_token = 0;

        while start_token < tokens.len() {
            let end_token = (start_token + self.chunk_size).min(tokens.len());
            chunks.push(self.counter.decode(&tokens[start_token..end_token]));

            if end_token >= tokens.len() {
                break;
            }

            start_token += step;
        }

        Ok(chunks)
    }
}
