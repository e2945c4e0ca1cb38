use crate::decode::ResponseShape;
use crate::errors::InvocationError;
use crate::model::LlmResponse;
use crate::providers::llm::LlmClient;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info_span, Instrument};

/// Wraps a client in a `gen_ai.client.request` span per call.
///
/// Prompt and reply payloads are never recorded; only provider, model, shape,
/// reply size and error details.
pub struct TracingLlmClient {
    inner: Arc<dyn LlmClient>,
    judge: String,
}

impl TracingLlmClient {
    pub fn new(inner: Arc<dyn LlmClient>, judge: impl Into<String>) -> Self {
        Self {
            inner,
            judge: judge.into(),
        }
    }
}

#[async_trait]
impl LlmClient for TracingLlmClient {
    async fn complete(
        &self,
        prompt: &str,
        instructions: &str,
        shape: &ResponseShape,
    ) -> Result<LlmResponse, InvocationError> {
        let span = info_span!(
            "gen_ai.client.request",
            "arbiter.provider" = self.inner.provider_name(),
            "arbiter.judge" = self.judge.as_str(),
            "arbiter.shape" = shape.name(),
            "gen_ai.request.model" = tracing::field::Empty,
            "arbiter.reply.bytes" = tracing::field::Empty,
            "arbiter.duration_ms" = tracing::field::Empty,
            "error" = tracing::field::Empty,
            "error.message" = tracing::field::Empty
        );

        async move {
            let start = std::time::Instant::now();
            let result = self.inner.complete(prompt, instructions, shape).await;

            let span = tracing::Span::current();
            span.record("arbiter.duration_ms", start.elapsed().as_millis() as u64);
            match &result {
                Ok(resp) => {
                    span.record("gen_ai.request.model", resp.model.as_str());
                    span.record("arbiter.reply.bytes", resp.text.len() as u64);
                }
                Err(e) => {
                    span.record("error", true);
                    span.record("error.message", e.to_string().as_str());
                }
            }

            result
        }
        .instrument(span)
        .await
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }

    fn fingerprint(&self) -> Option<String> {
        self.inner.fingerprint()
    }
}
