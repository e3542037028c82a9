//! Fixed-separator splitter.

use anyhow::Result;

use super::base::{hard_split, merge_splits, TextSplitter};

/// Splitter that cuts text on a single fixed separator.
///
/// Pieces are merged back into chunks within the character budget, with an
/// optional overlap carried between adjacent chunks. A piece no separator
/// can reduce is hard-split on grapheme boundaries.
pub struct CharacterSplitter {
    separator: String,
    keep_separator: bool,
    chunk_size: usize,
    chunk_overlap: usize,
}

impl CharacterSplitter {
    /// Create a splitter with the given separator and budgets.
    pub fn new(separator: impl Into<String>, chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            separator: separator.into(),
            keep_separator: false,
            chunk_size,
            chunk_overlap,
        }
    }

    /// Retain the separator at the end of each piece instead of dropping it.
    pub fn with_keep_separator(mut self, keep: bool) -> Self {
        self.keep_separator = keep;
        self
    }

    /// Cut the text into raw pieces, hard-splitting any oversized piece.
    fn split_pieces(&self, text: &str) -> Vec<String> {
        let raw: Vec<String> = if self.keep_separator {
            text.split_inclusive(self.separator.as_str())
                .map(String::from)
                .collect()
        } else {
            text.split(self.separator.as_str()).map(String::from).collect()
        };

        let mut pieces = Vec::with_capacity(raw.len());
        for piece in raw {
            if piece.len() > self.chunk_size {
                pieces.extend(hard_split(&piece, self.chunk_size));
            } else {
                pieces.push(piece);
            }
        }

        pieces
    }
}

impl TextSplitter for CharacterSplitter {
    fn name(&self) -> &'static str {
        "character"
    }

    fn description(&self) -> &'static str {
        "Splits text on a fixed separator with configurable overlap"
    }

    fn split(&self, text: &str) -> Result<Vec<String>> {
        if text.is_empty() {
            return Ok(vec![]);
        }

        let pieces = self.split_pieces(text);
        let join_separator = if self.keep_separator {
            ""
        } else {
            self.separator.as_str()
        };

        Ok(merge_splits(
            pieces,
            join_separator,
            self.chunk_size,
            self.chunk_overlap,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        let splitter = CharacterSplitter::new(" ", 5, 0);
        assert!(splitter.split("").unwrap().is_empty());
    }

    #[test]
    fn test_space_separator_scenario() {
        let splitter = CharacterSplitter::new(" ", 5, 0);
        let chunks = splitter.split("AAAA BBBB CCCC").unwrap();
        assert_eq!(chunks, vec!["AAAA", "BBBB", "CCCC"]);
    }

    #[test]
    fn test_small_text_single_chunk() {
        let splitter = CharacterSplitter::new(" ", 100, 0);
        let chunks = splitter.split("hello world").unwrap();
        assert_eq!(chunks, vec!["hello world"]);
    }

    #[test]
    fn test_keep_separator() {
        let splitter = CharacterSplitter::new("\n", 6, 0).with_keep_separator(true);
        let chunks = splitter.split("aa\nbb\ncc").unwrap();
        assert_eq!(chunks, vec!["aa\nbb\n", "cc"]);
    }

    #[test]
    fn test_oversized_piece_hard_split() {
        let splitter = CharacterSplitter::new(" ", 4, 0);
        let chunks = splitter.split("abcdefgh ij").unwrap();
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 4);
        }
        assert!(chunks.concat().contains("abcd"));
        assert!(chunks.concat().contains("efgh"));
    }

    #[test]
    fn test_overlap_between_chunks() {
        let splitter = CharacterSplitter::new(" ", 5, 2);
        let chunks = splitter.split("aa bb cc dd").unwrap();
        assert_eq!(chunks, vec!["aa bb", "bb cc", "cc dd"]);
    }
}
