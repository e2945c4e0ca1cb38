use std::sync::Arc;

use arbiter_core::errors::ConfigError;
use arbiter_core::metrics_api::Metric;
use arbiter_core::providers::llm::LlmClient;

mod completeness;

pub use completeness::{binary_score, CompletenessMetric};

pub fn default_metrics(client: Arc<dyn LlmClient>) -> Result<Vec<Arc<dyn Metric>>, ConfigError> {
    let completeness: Arc<dyn Metric> = Arc::new(CompletenessMetric::with_client(client)?);
    Ok(vec![completeness])
}
