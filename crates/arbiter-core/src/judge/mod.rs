mod judge_internal;
pub mod prompt;

use crate::errors::{ConfigError, EvalResult};
use crate::fingerprint::{self, Fingerprint};
use crate::model::{EvaluationInput, Rationale, Verdict, VerdictLabel};
use crate::providers::llm::LlmClient;
use std::fmt;
use std::sync::Arc;

pub const COMPLETENESS_JUDGE_NAME: &str = "Recipe Completeness Judge";

/// Construction-time judge configuration. Validated once by [`Judge::new`].
#[derive(Clone)]
pub struct JudgeConfig {
    pub name: String,
    pub instructions: String,
    pub client: Option<Arc<dyn LlmClient>>,
}

impl JudgeConfig {
    /// The built-in recipe completeness persona bound to `client`.
    pub fn completeness(client: Arc<dyn LlmClient>) -> Self {
        Self {
            name: COMPLETENESS_JUDGE_NAME.to_string(),
            instructions: prompt::render_instructions(),
            client: Some(client),
        }
    }
}

impl fmt::Debug for JudgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JudgeConfig")
            .field("name", &self.name)
            .field("instructions", &self.instructions)
            .field("client", &self.client.as_ref().map(|c| c.provider_name()))
            .finish()
    }
}

/// One evaluation persona bound to one model client.
///
/// Holds no mutable state: a single instance (or its clones) can serve any number of
/// concurrent evaluations.
#[derive(Clone)]
pub struct Judge {
    name: String,
    instructions: String,
    client: Arc<dyn LlmClient>,
}

impl Judge {
    pub fn new(config: JudgeConfig) -> Result<Self, ConfigError> {
        if config.name.trim().is_empty() {
            return Err(ConfigError::empty("judge.name"));
        }
        if config.instructions.trim().is_empty() {
            return Err(ConfigError::empty("judge.instructions"));
        }
        let client = config.client.ok_or_else(|| ConfigError::MissingClient {
            judge: config.name.clone(),
        })?;

        Ok(Self {
            name: config.name,
            instructions: config.instructions,
            client,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn provider_name(&self) -> &'static str {
        self.client.provider_name()
    }

    pub fn fingerprint(&self) -> Fingerprint {
        fingerprint::compute(
            &self.name,
            &self.instructions,
            self.client.provider_name(),
            self.client.fingerprint().as_deref(),
            &[],
        )
    }

    /// Asks the model whether `input.output` satisfies the rubric for `input.input`.
    pub async fn evaluate(&self, input: &EvaluationInput) -> EvalResult<Verdict> {
        judge_internal::run::evaluate_impl(self, input).await
    }

    /// Asks the model to justify a verdict produced earlier in the same run.
    pub async fn get_reason(
        &self,
        input: &EvaluationInput,
        missing_elements: &[String],
        label: VerdictLabel,
    ) -> EvalResult<Rationale> {
        judge_internal::run::get_reason_impl(self, input, missing_elements, label).await
    }
}

impl fmt::Debug for Judge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Judge")
            .field("name", &self.name)
            .field("provider", &self.client.provider_name())
            .finish_non_exhaustive()
    }
}
