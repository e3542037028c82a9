//! The enrichment pipeline driver.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::assembler::assemble;
use crate::batch::BatchScheduler;
use crate::error::PipelineError;
use crate::generator::ContextGenerator;
use crate::model::LanguageModel;
use crate::prompt::build_prompt;
use crate::splitters::{build_splitter, TextSplitter};
use crate::types::{Chunk, ContextResult, EnrichedDocument, InputRecord, PipelineConfig};

/// Drives records through split, context generation, and assembly.
///
/// Configuration problems surface from [`ContextualPipeline::new`] before
/// any model call is made; per-chunk model failures degrade to
/// uncontextualized chunks and never abort a run. No state is retained
/// across records beyond the output accumulation.
pub struct ContextualPipeline {
    config: PipelineConfig,
    splitter: Arc<dyn TextSplitter>,
    generator: Option<ContextGenerator>,
}

impl ContextualPipeline {
    /// Build a pipeline, validating the configuration up front.
    ///
    /// A model capability is required unless contextual retrieval is
    /// disabled, in which case chunks pass through unenriched.
    pub fn new(
        config: PipelineConfig,
        model: Option<Arc<dyn LanguageModel>>,
    ) -> Result<Self, PipelineError> {
        config.validate()?;
        let splitter = build_splitter(&config.splitter)?;

        let generator = if config.enable_contextual_retrieval {
            let model = model.ok_or_else(|| {
                PipelineError::config(
                    "no language model configured; connect a model capability or disable contextual retrieval",
                )
            })?;
            Some(ContextGenerator::new(model, config.max_retries))
        } else {
            None
        };

        Ok(Self {
            config,
            splitter,
            generator,
        })
    }

    /// Set the delay unit between model retries.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.generator = self.generator.map(|g| g.with_base_delay(delay));
        self
    }

    /// Get the name of the configured splitting strategy.
    pub fn splitter_name(&self) -> &'static str {
        self.splitter.name()
    }

    /// Run the pipeline over the given records.
    ///
    /// Returns one document per chunk, ordered by record and then by chunk
    /// index within each record.
    pub async fn run(
        &self,
        records: &[InputRecord],
    ) -> Result<Vec<EnrichedDocument>, PipelineError> {
        let mut documents = Vec::new();

        for record in records {
            let text = record.resolve_text();
            let seed = record.seed_metadata(&self.config.metadata);

            let chunk_texts = self
                .splitter
                .split(&text)
                .map_err(|e| PipelineError::config(format!("splitting failed: {e}")))?;
            let chunks = Chunk::from_split(chunk_texts);

            info!(
                record_id = %record.id,
                chunks = chunks.len(),
                splitter = self.splitter.name(),
                "Processing record"
            );

            match &self.generator {
                Some(generator) => {
                    let scheduler = BatchScheduler::new(self.config.batch_size);
                    let config = &self.config;
                    let document_text = text.as_str();
                    let seed_ref = &seed;

                    let enriched = scheduler
                        .run(chunks, move |_, chunk| {
                            let seed = seed_ref.clone();
                            async move {
                                let prompt = build_prompt(
                                    document_text,
                                    &chunk.content,
                                    &config.context_prompt,
                                );
                                let context = generator.generate(&prompt).await;
                                assemble(
                                    &chunk,
                                    &context,
                                    &config.context_prefix,
                                    &config.context_separator,
                                    seed,
                                )
                            }
                        })
                        .await;

                    documents.extend(enriched);
                }
                None => {
                    // Pass-through mode: chunks are emitted unenriched.
                    for chunk in chunks {
                        documents.push(assemble(
                            &chunk,
                            &ContextResult::failed(),
                            &self.config.context_prefix,
                            &self.config.context_separator,
                            seed.clone(),
                        ));
                    }
                }
            }
        }

        info!(documents = documents.len(), "Pipeline run complete");
        Ok(documents)
    }
}
