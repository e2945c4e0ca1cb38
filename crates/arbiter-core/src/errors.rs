//! Error taxonomy for the evaluation core.
//!
//! Every failure reaching a caller of `Judge` or `Metric` is one of three kinds:
//! the model call failed ([`InvocationError`]), the model replied with something
//! that does not match the expected shape ([`DecodeError`]), or the judge/metric
//! was built from invalid configuration ([`ConfigError`]). None of them is ever
//! turned into a default score.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalErrorKind {
    Invocation,
    Decode,
    Configuration,
}

/// Top-level error surfaced by `Judge::evaluate`, `Judge::get_reason` and `Metric::measure`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    #[error(transparent)]
    Invocation(#[from] InvocationError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Configuration(#[from] ConfigError),
}

impl EvalError {
    pub fn kind(&self) -> EvalErrorKind {
        match self {
            Self::Invocation(_) => EvalErrorKind::Invocation,
            Self::Decode(_) => EvalErrorKind::Decode,
            Self::Configuration(_) => EvalErrorKind::Configuration,
        }
    }
}

pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationErrorKind {
    /// The call did not complete within its deadline.
    Timeout,
    /// Connection, DNS or I/O level failure.
    Transport,
    /// The provider answered but rejected the request (auth, quota, 4xx/5xx).
    Provider,
}

/// The external model call itself failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("model invocation failed ({provider}, {kind:?}): {message}")]
pub struct InvocationError {
    pub kind: InvocationErrorKind,
    pub provider: String,
    pub message: String,
}

impl InvocationError {
    pub fn new(
        kind: InvocationErrorKind,
        provider: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn timeout(provider: impl Into<String>, after: Duration) -> Self {
        Self::new(
            InvocationErrorKind::Timeout,
            provider,
            format!("no reply within {}ms", after.as_millis()),
        )
    }

    pub fn transport(provider: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(InvocationErrorKind::Transport, provider, detail)
    }

    pub fn provider(provider: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(InvocationErrorKind::Provider, provider, detail)
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == InvocationErrorKind::Timeout
    }
}

/// The model replied, but the reply does not validate against the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("decode error ({shape}): no JSON object found in model reply")]
    NoJson { shape: String },

    #[error("decode error ({shape}): reply holds {count} conflicting JSON objects")]
    Ambiguous { shape: String, count: usize },

    #[error("decode error ({shape}): field '{field}' appears more than once with different values")]
    DuplicateField { shape: String, field: String },

    #[error("decode error ({shape}): reply violates shape: {}", violations.join("; "))]
    SchemaViolation {
        shape: String,
        violations: Vec<String>,
    },

    #[error("decode error ({shape}): {detail}")]
    Malformed { shape: String, detail: String },

    #[error("decode error: unrecognized verdict '{literal}' (expected Complete or Incomplete)")]
    UnknownVerdict { literal: String },
}

impl DecodeError {
    pub fn shape(&self) -> &str {
        match self {
            Self::NoJson { shape }
            | Self::Ambiguous { shape, .. }
            | Self::DuplicateField { shape, .. }
            | Self::SchemaViolation { shape, .. }
            | Self::Malformed { shape, .. } => shape,
            Self::UnknownVerdict { .. } => "verdict",
        }
    }
}

/// Invalid construction-time configuration. Never raised at call time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration error: judge '{judge}' has no model client")]
    MissingClient { judge: String },

    #[error("configuration error: '{field}' must not be empty")]
    EmptyField { field: String },

    #[error("configuration error: scale must be a positive finite number (got {scale})")]
    InvalidScale { scale: f64 },

    #[error("configuration error: {field} must be greater than zero")]
    NonPositive { field: String },

    #[error("configuration error: unsupported settings version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("configuration error: failed to read {path}: {detail}")]
    Read { path: String, detail: String },

    #[error("configuration error: failed to parse settings: {detail}")]
    Parse { detail: String },
}

impl ConfigError {
    pub fn empty(field: impl Into<String>) -> Self {
        Self::EmptyField {
            field: field.into(),
        }
    }
}
