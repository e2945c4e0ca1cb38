use super::LlmClient;
use crate::decode::ResponseShape;
use crate::errors::InvocationError;
use crate::model::LlmResponse;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Bounds every call of the wrapped client. An elapsed deadline drops the inner future
/// and surfaces as a timeout `InvocationError` for that call only.
pub struct TimeoutLlmClient {
    inner: Arc<dyn LlmClient>,
    limit: Duration,
}

impl TimeoutLlmClient {
    pub fn new(inner: Arc<dyn LlmClient>, limit: Duration) -> Self {
        Self { inner, limit }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }
}

#[async_trait]
impl LlmClient for TimeoutLlmClient {
    async fn complete(
        &self,
        prompt: &str,
        instructions: &str,
        shape: &ResponseShape,
    ) -> Result<LlmResponse, InvocationError> {
        match tokio::time::timeout(self.limit, self.inner.complete(prompt, instructions, shape))
            .await
        {
            Ok(result) => result,
            Err(_) => {
                ::tracing::warn!(
                    provider = self.inner.provider_name(),
                    shape = shape.name(),
                    limit_ms = self.limit.as_millis() as u64,
                    "model invocation timed out"
                );
                Err(InvocationError::timeout(
                    self.inner.provider_name(),
                    self.limit,
                ))
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }

    fn fingerprint(&self) -> Option<String> {
        self.inner.fingerprint()
    }
}
