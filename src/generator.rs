//! Context generation with bounded retry.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::model::LanguageModel;
use crate::types::ContextResult;

/// Default delay unit between retries.
const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Generates the situating context for one chunk, retrying on failure.
///
/// `max_retries` counts total attempts with a minimum of one: the first
/// model call always executes, and `max_retries = 3` means at most three
/// calls with two backoff delays between them. The delay grows linearly
/// with the attempt number (1s, 2s, 3s, ...).
///
/// A successful invocation with an empty reply still counts as success and
/// is not retried. Exhausted retries degrade to an empty context and are
/// logged; they never abort the pipeline.
pub struct ContextGenerator {
    model: Arc<dyn LanguageModel>,
    max_retries: usize,
    base_delay: Duration,
}

impl ContextGenerator {
    /// Create a generator over the given model capability.
    pub fn new(model: Arc<dyn LanguageModel>, max_retries: usize) -> Self {
        Self {
            model,
            max_retries,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }

    /// Set the delay unit between retries.
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Generate context for the given prompt.
    pub async fn generate(&self, prompt: &str) -> ContextResult {
        let max_attempts = self.max_retries.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;

            match self.model.invoke(prompt).await {
                Ok(response) => {
                    debug!(attempt, "Context generated");
                    return ContextResult::success(response.into_text());
                }
                Err(e) => {
                    if attempt >= max_attempts {
                        warn!(
                            attempts = attempt,
                            error = %e,
                            "Context generation failed, falling back to chunk without context"
                        );
                        return ContextResult::failed();
                    }

                    debug!(attempt, error = %e, "Model invocation failed, retrying");
                    tokio::time::sleep(self.base_delay * attempt as u32).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::Result;
    use async_trait::async_trait;

    use crate::model::ModelResponse;

    /// Model that fails a fixed number of invocations before succeeding.
    struct FlakyModel {
        fail_first: usize,
        reply: String,
        invocations: AtomicUsize,
    }

    impl FlakyModel {
        fn new(fail_first: usize, reply: &str) -> Self {
            Self {
                fail_first,
                reply: reply.to_string(),
                invocations: AtomicUsize::new(0),
            }
        }

        fn invocations(&self) -> usize {
            self.invocations.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LanguageModel for FlakyModel {
        fn name(&self) -> &'static str {
            "flaky"
        }

        async fn invoke(&self, _prompt: &str) -> Result<ModelResponse> {
            let attempt = self.invocations.fetch_add(1, Ordering::SeqCst);
            if attempt < self.fail_first {
                anyhow::bail!("model unavailable");
            }
            Ok(ModelResponse::Text(self.reply.clone()))
        }
    }

    fn generator(model: Arc<FlakyModel>, max_retries: usize) -> ContextGenerator {
        ContextGenerator::new(model, max_retries).with_base_delay(Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_success_on_first_attempt() {
        let model = Arc::new(FlakyModel::new(0, "a context"));
        let result = generator(Arc::clone(&model), 3).generate("prompt").await;

        assert_eq!(result, ContextResult::success("a context"));
        assert_eq!(model.invocations(), 1);
    }

    #[tokio::test]
    async fn test_fail_then_succeed() {
        let model = Arc::new(FlakyModel::new(1, "X"));
        let result = generator(Arc::clone(&model), 2).generate("prompt").await;

        assert_eq!(result, ContextResult::success("X"));
        assert_eq!(model.invocations(), 2);
    }

    #[tokio::test]
    async fn test_exhausted_retries() {
        let model = Arc::new(FlakyModel::new(usize::MAX, ""));
        let result = generator(Arc::clone(&model), 3).generate("prompt").await;

        assert_eq!(result, ContextResult::failed());
        assert_eq!(model.invocations(), 3);
    }

    #[tokio::test]
    async fn test_zero_retries_still_attempts_once() {
        let model = Arc::new(FlakyModel::new(0, "ctx"));
        let result = generator(Arc::clone(&model), 0).generate("prompt").await;

        assert!(result.succeeded);
        assert_eq!(model.invocations(), 1);
    }

    #[tokio::test]
    async fn test_empty_reply_is_success_not_retried() {
        let model = Arc::new(FlakyModel::new(0, ""));
        let result = generator(Arc::clone(&model), 3).generate("prompt").await;

        assert!(result.succeeded);
        assert!(!result.has_context());
        assert_eq!(model.invocations(), 1);
    }
}
