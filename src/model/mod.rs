//! Language model capability consumed by the context generator.

mod client;

pub use client::HttpModelClient;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// A reply from the model capability.
///
/// Providers return either a plain completion string or a structured
/// message object; the pipeline only ever needs the textual payload.
#[derive(Debug, Clone)]
pub enum ModelResponse {
    /// A plain completion string
    Text(String),

    /// A structured message exposing its text via a `content` field
    Structured(Value),
}

impl ModelResponse {
    /// Extract the textual payload of this reply.
    ///
    /// Structured replies without a string `content` field coerce to the
    /// empty string rather than failing: an unusable reply is still a
    /// successful invocation.
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Structured(value) => value
                .get("content")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_default(),
        }
    }
}

/// The model capability: prompt in, completion out.
///
/// Invocations may fail transiently; retry policy belongs to the caller.
/// Implementations hold no per-call mutable state and are shared read-only
/// across concurrent generation tasks.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Get the name of this model capability.
    fn name(&self) -> &'static str;

    /// Invoke the model with the given prompt.
    async fn invoke(&self, prompt: &str) -> Result<ModelResponse>;
}
