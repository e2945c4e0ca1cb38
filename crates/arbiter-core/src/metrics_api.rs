use crate::errors::{ConfigError, EvalResult};
use crate::model::ScoredResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetricConfig {
    /// Multiplier applied to the binary score. Must be positive and finite.
    pub scale: f64,
}

impl Default for MetricConfig {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl MetricConfig {
    pub fn with_scale(scale: f64) -> Self {
        Self { scale }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ConfigError::InvalidScale { scale: self.scale });
        }
        Ok(())
    }
}

/// A full evaluation: judge the output, explain the judgment, score it.
#[async_trait]
pub trait Metric: Send + Sync {
    fn name(&self) -> &str;

    async fn measure(&self, input: &str, output: &str) -> EvalResult<ScoredResult>;

    fn fingerprint(&self) -> Option<String> {
        None
    }
}
