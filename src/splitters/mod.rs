//! Splitting strategies for breaking documents into chunks.

mod base;
mod character_splitter;
mod markdown_splitter;
mod recursive_splitter;
mod token_splitter;

use std::sync::Arc;

pub use base::{hard_split, merge_splits, TextSplitter, TiktokenCounter, TokenCounter};
pub use character_splitter::CharacterSplitter;
pub use markdown_splitter::MarkdownSplitter;
pub use recursive_splitter::RecursiveSplitter;
pub use token_splitter::TokenSplitter;

use crate::error::PipelineError;
use crate::types::SplitterConfig;

/// Construct the splitter a configuration describes.
///
/// Validates the configuration first so an unconfigurable strategy fails
/// fast, before any document is processed.
pub fn build_splitter(config: &SplitterConfig) -> Result<Arc<dyn TextSplitter>, PipelineError> {
    config.validate()?;

    let splitter: Arc<dyn TextSplitter> = match config {
        SplitterConfig::Character {
            chunk_size,
            chunk_overlap,
            separator,
            keep_separator,
        } => Arc::new(
            CharacterSplitter::new(separator.clone(), *chunk_size, *chunk_overlap)
                .with_keep_separator(*keep_separator),
        ),

        SplitterConfig::Recursive {
            chunk_size,
            chunk_overlap,
            separators,
        } => match separators {
            Some(separators) => Arc::new(RecursiveSplitter::with_separators(
                separators.clone(),
                *chunk_size,
                *chunk_overlap,
            )),
            None => Arc::new(RecursiveSplitter::new(*chunk_size, *chunk_overlap)),
        },

        SplitterConfig::TokenCount {
            chunk_size,
            chunk_overlap,
            encoding,
        } => {
            let encoding = encoding.as_deref().unwrap_or("cl100k_base");
            let splitter = TokenSplitter::with_encoding(encoding, *chunk_size, *chunk_overlap)
                .map_err(|e| {
                    PipelineError::config(format!("failed to load token encoding: {e}"))
                })?;
            Arc::new(splitter)
        }

        SplitterConfig::Markdown {
            chunk_size,
            chunk_overlap,
        } => Arc::new(MarkdownSplitter::new(*chunk_size, *chunk_overlap)),
    };

    Ok(splitter)
}

/// List the built-in strategies with their descriptions.
pub fn list_strategies() -> Vec<(&'static str, &'static str)> {
    let character = CharacterSplitter::new("\n\n", 1, 0);
    let recursive = RecursiveSplitter::new(1, 0);
    let markdown = MarkdownSplitter::new(1, 0);
    let token = TokenSplitter::new(1, 0);

    vec![
        (character.name(), character.description()),
        (recursive.name(), recursive.description()),
        (token.name(), token.description()),
        (markdown.name(), markdown.description()),
    ]
}
