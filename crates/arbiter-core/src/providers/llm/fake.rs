use super::LlmClient;
use crate::decode::ResponseShape;
use crate::errors::InvocationError;
use crate::model::LlmResponse;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Clone)]
enum Scripted {
    Reply(String),
    Fail(InvocationError),
}

/// Deterministic in-process client. Replies are scripted per response shape name
/// (`"verdict"`, `"reason"`), and every call is recorded.
#[derive(Debug)]
pub struct FakeClient {
    model: String,
    scripted: HashMap<String, Scripted>,
    calls: Mutex<Vec<String>>,
}

impl FakeClient {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            scripted: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_response(mut self, shape: &str, text: impl Into<String>) -> Self {
        self.scripted
            .insert(shape.to_string(), Scripted::Reply(text.into()));
        self
    }

    pub fn with_failure(mut self, shape: &str, err: InvocationError) -> Self {
        self.scripted.insert(shape.to_string(), Scripted::Fail(err));
        self
    }

    /// Shape names of every call made so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self, shape: &str) -> usize {
        self.calls().iter().filter(|s| s.as_str() == shape).count()
    }
}

#[async_trait]
impl LlmClient for FakeClient {
    async fn complete(
        &self,
        _prompt: &str,
        _instructions: &str,
        shape: &ResponseShape,
    ) -> Result<LlmResponse, InvocationError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(shape.name().to_string());

        match self.scripted.get(shape.name()) {
            Some(Scripted::Reply(text)) => Ok(LlmResponse {
                text: text.clone(),
                provider: "fake".to_string(),
                model: self.model.clone(),
                meta: serde_json::json!({}),
            }),
            Some(Scripted::Fail(err)) => Err(err.clone()),
            None => Err(InvocationError::provider(
                "fake",
                format!("no scripted reply for shape '{}'", shape.name()),
            )),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn fingerprint(&self) -> Option<String> {
        Some(format!("fake:{}", self.model))
    }
}
