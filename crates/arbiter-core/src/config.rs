use crate::errors::ConfigError;
use crate::judge::{prompt, JudgeConfig, COMPLETENESS_JUDGE_NAME};
use crate::metrics_api::MetricConfig;
use crate::providers::llm::timeout::TimeoutLlmClient;
use crate::providers::llm::tracing::TracingLlmClient;
use crate::providers::llm::LlmClient;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub const SUPPORTED_SETTINGS_VERSION: u32 = 1;

/// Evaluation settings file (`arbiter.yaml`).
///
/// ```yaml
/// version: 1
/// judge:
///   name: Recipe Completeness Judge
///   timeout_ms: 30000
/// metric:
///   scale: 10
/// run:
///   parallel: 8
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvalSettings {
    pub version: u32,
    #[serde(default)]
    pub judge: JudgeSettings,
    #[serde(default)]
    pub metric: MetricConfig,
    #[serde(default)]
    pub run: RunSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JudgeSettings {
    pub name: String,
    /// Persona instructions. Defaults to the built-in completeness instructions.
    pub instructions: Option<String>,
    /// Per-invocation deadline. Unset means the client's own behavior applies.
    pub timeout_ms: Option<u64>,
}

impl Default for JudgeSettings {
    fn default() -> Self {
        Self {
            name: COMPLETENESS_JUDGE_NAME.to_string(),
            instructions: None,
            timeout_ms: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunSettings {
    pub parallel: usize,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self { parallel: 4 }
    }
}

impl EvalSettings {
    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        let settings: EvalSettings = serde_yaml::from_str(raw).map_err(|e| ConfigError::Parse {
            detail: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != SUPPORTED_SETTINGS_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: self.version,
                supported: SUPPORTED_SETTINGS_VERSION,
            });
        }
        self.judge.validate()?;
        self.metric.validate()?;
        if self.run.parallel == 0 {
            return Err(ConfigError::NonPositive {
                field: "run.parallel".into(),
            });
        }
        Ok(())
    }
}

impl JudgeSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::empty("judge.name"));
        }
        if matches!(&self.instructions, Some(i) if i.trim().is_empty()) {
            return Err(ConfigError::empty("judge.instructions"));
        }
        if self.timeout_ms == Some(0) {
            return Err(ConfigError::NonPositive {
                field: "judge.timeout_ms".into(),
            });
        }
        Ok(())
    }

    /// Builds a judge configuration around `client`.
    ///
    /// The client is wrapped in a per-call tracing span and, when `timeout_ms` is set, a
    /// deadline; the span sits outside the deadline so timeouts are recorded on it.
    pub fn into_config(&self, client: Arc<dyn LlmClient>) -> JudgeConfig {
        let bounded: Arc<dyn LlmClient> = match self.timeout_ms {
            Some(ms) => Arc::new(TimeoutLlmClient::new(client, Duration::from_millis(ms))),
            None => client,
        };
        JudgeConfig {
            name: self.name.clone(),
            instructions: self
                .instructions
                .clone()
                .unwrap_or_else(prompt::render_instructions),
            client: Some(Arc::new(TracingLlmClient::new(bounded, self.name.clone()))),
        }
    }
}

pub fn load_settings(path: &Path) -> Result<EvalSettings, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.display().to_string(),
        detail: e.to_string(),
    })?;
    EvalSettings::from_yaml_str(&raw)
}
