//! Base trait and shared helpers for all splitters.

use anyhow::Result;
use unicode_segmentation::UnicodeSegmentation;

/// The core trait every splitting strategy implements.
///
/// A splitter takes a document's text and produces an ordered sequence of
/// chunk strings. Order is significant: downstream enrichment preserves it
/// end-to-end. Splitting never fails mid-document; configurations that
/// would make a strategy unconstructible are rejected before any document
/// is processed.
pub trait TextSplitter: Send + Sync {
    /// Get the name of this splitter.
    fn name(&self) -> &'static str;

    /// Split the given text into ordered chunks.
    ///
    /// Concatenating the chunks (ignoring overlap) reconstructs the text's
    /// content; chunk length stays within the configured size best-effort.
    fn split(&self, text: &str) -> Result<Vec<String>>;

    /// Get the description of this splitter.
    fn description(&self) -> &'static str {
        "A text splitter"
    }
}

/// Token counter trait for counting tokens in text.
pub trait TokenCounter: Send + Sync {
    /// Count the number of tokens in the given text.
    fn count_tokens(&self, text: &str) -> usize;

    /// Encode text into token IDs.
    fn encode(&self, text: &str) -> Vec<usize>;

    /// Decode token IDs back to text.
    fn decode(&self, tokens: &[usize]) -> String;
}

/// Default token counter using tiktoken (cl100k_base encoding).
pub struct TiktokenCounter {
    bpe: tiktoken_rs::CoreBPE,
}

impl TiktokenCounter {
    /// Create a new token counter with the cl100k_base encoding (GPT-4/ChatGPT).
    pub fn new() -> Self {
        // cl100k_base is used by GPT-4, ChatGPT, and text-embedding-ada-002
        let bpe = tiktoken_rs::cl100k_base().expect("Failed to load cl100k_base encoding");
        Self { bpe }
    }

    /// Create a token counter with a specific encoding.
    pub fn with_encoding(encoding_name: &str) -> Result<Self> {
        let bpe = match encoding_name {
            "cl100k_base" => tiktoken_rs::cl100k_base()?,
            "p50k_base" => tiktoken_rs::p50k_base()?,
            "p50k_edit" => tiktoken_rs::p50k_edit()?,
            "r50k_base" => tiktoken_rs::r50k_base()?,
            _ => tiktoken_rs::cl100k_base()?,
        };
        Ok(Self { bpe })
    }
}

impl Default for TiktokenCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenCounter for TiktokenCounter {
    fn count_tokens(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }

    fn encode(&self, text: &str) -> Vec<usize> {
        self.bpe.encode_ordinary(text)
    }

    fn decode(&self, tokens: &[usize]) -> String {
        self.bpe.decode(tokens.to_vec()).unwrap_or_default()
    }
}

/// Merge separator splits into chunks within a character budget.
///
/// Pieces accumulate into a window until adding the next piece would exceed
/// `chunk_size`; the window is then emitted and pieces are dropped from its
/// front until the retained tail fits within `chunk_overlap`, carrying that
/// tail into the next chunk. Empty pieces are skipped.
pub fn merge_splits(
    pieces: Vec<String>,
    separator: &str,
    chunk_size: usize,
    chunk_overlap: usize,
) -> Vec<String> {
    let sep_len = separator.len();
    let mut chunks = Vec::new();
    let mut window: Vec<String> = Vec::new();
    let mut total = 0usize;

    for piece in pieces {
        if piece.is_empty() {
            continue;
        }

        let piece_len = piece.len();
        let joined_len = total + piece_len + if window.is_empty() { 0 } else { sep_len };

        if joined_len > chunk_size && !window.is_empty() {
            chunks.push(window.join(separator));

            // Drop from the front until the tail fits the overlap budget and
            // leaves room for the incoming piece.
            while total > chunk_overlap
                || (total + piece_len + if window.is_empty() { 0 } else { sep_len } > chunk_size
                    && total > 0)
            {
                let removed = window.remove(0);
                total -= removed.len() + if window.is_empty() { 0 } else { sep_len };
            }
        }

        total += piece_len + if window.is_empty() { 0 } else { sep_len };
        window.push(piece);
    }

    if !window.is_empty() {
        chunks.push(window.join(separator));
    }

    chunks
}

/// Hard-split text into pieces of at most `chunk_size` characters.
///
/// Splits on grapheme cluster boundaries so multi-byte characters and
/// combining sequences are never cut in half. Last resort for pieces no
/// separator can reduce.
pub fn hard_split(text: &str, chunk_size: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;

    for grapheme in text.graphemes(true) {
        let grapheme_chars = grapheme.chars().count();
        if current_chars + grapheme_chars > chunk_size && !current.is_empty() {
            pieces.push(std::mem::take(&mut current));
            current_chars = 0;
        }
        current.push_str(grapheme);
        current_chars += grapheme_chars;
    }

    if !current.is_empty() {
        pieces.push(current);
    }

    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_splits_respects_budget() {
        let pieces = vec!["AAAA".to_string(), "BBBB".to_string(), "CCCC".to_string()];
        let chunks = merge_splits(pieces, " ", 5, 0);
        assert_eq!(chunks, vec!["AAAA", "BBBB", "CCCC"]);
    }

    #[test]
    fn test_merge_splits_joins_small_pieces() {
        let pieces = vec!["aa".to_string(), "bb".to_string(), "cc".to_string()];
        let chunks = merge_splits(pieces, " ", 8, 0);
        assert_eq!(chunks, vec!["aa bb cc"]);
    }

    #[test]
    fn test_merge_splits_overlap_carries_tail() {
        let pieces = vec![
            "one".to_string(),
            "two".to_string(),
            "three".to_string(),
            "four".to_string(),
        ];
        let chunks = merge_splits(pieces, " ", 10, 4);
        assert!(chunks.len() > 1);
        // Adjacent chunks share a trailing piece
        assert!(chunks[1].starts_with(chunks[0].rsplit(' ').next().unwrap()));
    }

    #[test]
    fn test_merge_splits_skips_empty_pieces() {
        let pieces = vec!["aa".to_string(), String::new(), "bb".to_string()];
        let chunks = merge_splits(pieces, " ", 100, 0);
        assert_eq!(chunks, vec!["aa bb"]);
    }

    #[test]
    fn test_hard_split_respects_graphemes() {
        let pieces = hard_split("héllo wörld", 4);
        for piece in &pieces {
            assert!(piece.chars().count() <= 4);
        }
        assert_eq!(pieces.concat(), "héllo wörld");
    }

    #[test]
    fn test_hard_split_short_input() {
        assert_eq!(hard_split("abc", 10), vec!["abc"]);
        assert!(hard_split("", 10).is_empty());
    }
}
