use arbiter_core::config::EvalSettings;
use arbiter_core::errors::{ConfigError, EvalResult};
use arbiter_core::judge::{Judge, JudgeConfig};
use arbiter_core::metrics_api::{Metric, MetricConfig};
use arbiter_core::model::{EvaluationInput, ScoreInfo, ScoredResult, VerdictLabel};
use arbiter_core::providers::llm::LlmClient;
use async_trait::async_trait;
use std::sync::Arc;

/// Binary score for a verdict label. Deliberately ignores how many elements are missing.
pub fn binary_score(label: VerdictLabel) -> f64 {
    match label {
        VerdictLabel::Incomplete => 0.0,
        VerdictLabel::Complete => 1.0,
    }
}

/// Judge-backed completeness metric: verdict, then rationale, then `binary_score * scale`.
#[derive(Debug, Clone)]
pub struct CompletenessMetric {
    judge: Judge,
    config: MetricConfig,
}

impl CompletenessMetric {
    pub fn new(judge: Judge, config: MetricConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { judge, config })
    }

    /// Built-in recipe completeness judge on `client`, default scale.
    pub fn with_client(client: Arc<dyn LlmClient>) -> Result<Self, ConfigError> {
        Self::new(
            Judge::new(JudgeConfig::completeness(client))?,
            MetricConfig::default(),
        )
    }

    /// Judge and scale from a validated settings file.
    pub fn from_settings(
        settings: &EvalSettings,
        client: Arc<dyn LlmClient>,
    ) -> Result<Self, ConfigError> {
        let judge = Judge::new(settings.judge.into_config(client))?;
        Self::new(judge, settings.metric)
    }

    pub fn judge(&self) -> &Judge {
        &self.judge
    }

    pub fn scale(&self) -> f64 {
        self.config.scale
    }
}

#[async_trait]
impl Metric for CompletenessMetric {
    fn name(&self) -> &str {
        "completeness"
    }

    async fn measure(&self, input: &str, output: &str) -> EvalResult<ScoredResult> {
        let input = EvaluationInput::new(input, output);

        let verdict = self.judge.evaluate(&input).await?;
        let score = binary_score(verdict.label);

        let rationale = self
            .judge
            .get_reason(&input, &verdict.missing_elements, verdict.label)
            .await?;

        tracing::debug!(
            judge = self.judge.name(),
            label = verdict.label.as_str(),
            score,
            scale = self.config.scale,
            "completeness measured"
        );

        Ok(ScoredResult {
            score: score * self.config.scale,
            info: ScoreInfo {
                missing_elements: verdict.missing_elements,
                reason: rationale.reason,
            },
        })
    }

    fn fingerprint(&self) -> Option<String> {
        let judge = self.judge.fingerprint();
        Some(arbiter_core::fingerprint::sha256_hex(&format!(
            "metric=completeness\nscale={}\njudge={}",
            self.config.scale, judge.hex
        )))
    }
}
