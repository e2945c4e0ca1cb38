use crate::decode::ResponseShape;
use crate::errors::InvocationError;
use crate::model::LlmResponse;
use async_trait::async_trait;

pub mod fake;
pub mod timeout;
pub mod tracing;

/// The model invocation capability a judge is bound to.
///
/// Implementations own provider selection, auth and transport. The judge only supplies
/// the persona instructions, the rendered prompt and the shape it expects back.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(
        &self,
        prompt: &str,
        instructions: &str,
        shape: &ResponseShape,
    ) -> Result<LlmResponse, InvocationError>;

    fn provider_name(&self) -> &'static str;

    /// Stable identity of the client configuration (model, sampling params), if known.
    fn fingerprint(&self) -> Option<String> {
        None
    }
}
