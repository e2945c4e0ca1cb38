use crate::config::RunSettings;
use crate::errors::{ConfigError, EvalResult};
use crate::metrics_api::Metric;
use crate::model::{EvaluationInput, ScoredResult};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

#[derive(Debug)]
pub struct RunRow {
    pub index: usize,
    pub input: EvaluationInput,
    pub outcome: EvalResult<ScoredResult>,
    pub duration_ms: u64,
}

#[derive(Debug)]
pub struct RunReport {
    pub metric: String,
    pub fingerprint: Option<String>,
    /// One row per input, in input order.
    pub rows: Vec<RunRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub total: usize,
    /// Rows scored above zero: a Complete verdict times a positive scale.
    pub complete: usize,
    /// Rows scored zero: an Incomplete verdict.
    pub incomplete: usize,
    pub errored: usize,
    /// Mean over rows that produced a score; `None` when every row errored.
    pub mean_score: Option<f64>,
}

impl RunReport {
    pub fn summary(&self) -> RunSummary {
        let mut complete = 0;
        let mut incomplete = 0;
        let mut errored = 0;
        let mut sum = 0.0;

        for row in &self.rows {
            match &row.outcome {
                Ok(res) if res.score > 0.0 => {
                    complete += 1;
                    sum += res.score;
                }
                Ok(_) => incomplete += 1,
                Err(_) => errored += 1,
            }
        }

        let scored = complete + incomplete;
        RunSummary {
            total: self.rows.len(),
            complete,
            incomplete,
            errored,
            mean_score: (scored > 0).then(|| sum / scored as f64),
        }
    }
}

/// Measures many inputs against one metric with bounded parallelism.
///
/// Rows are collected in completion order and returned sorted by input index. A failed
/// evaluation is kept as an `Err` row; it never aborts the rest of the batch.
pub struct Runner {
    metric: Arc<dyn Metric>,
    parallel: usize,
}

impl Runner {
    pub fn new(metric: Arc<dyn Metric>, parallel: usize) -> Result<Self, ConfigError> {
        if parallel == 0 {
            return Err(ConfigError::NonPositive {
                field: "run.parallel".into(),
            });
        }
        Ok(Self { metric, parallel })
    }

    pub fn from_settings(
        metric: Arc<dyn Metric>,
        settings: &RunSettings,
    ) -> Result<Self, ConfigError> {
        Self::new(metric, settings.parallel)
    }

    pub async fn run(&self, cases: Vec<EvaluationInput>) -> anyhow::Result<RunReport> {
        let sem = Arc::new(Semaphore::new(self.parallel));
        let mut join_set = JoinSet::new();
        let total = cases.len();

        tracing::info!(
            metric = self.metric.name(),
            total,
            parallel = self.parallel,
            "starting evaluation run"
        );

        for (index, case) in cases.into_iter().enumerate() {
            let permit = sem.clone().acquire_owned().await?;
            let metric = self.metric.clone();
            join_set.spawn(async move {
                let _permit = permit;
                let started = Instant::now();
                let outcome = metric.measure(&case.input, &case.output).await;
                RunRow {
                    index,
                    input: case,
                    outcome,
                    duration_ms: started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64,
                }
            });
        }

        let mut rows = Vec::with_capacity(total);
        while let Some(res) = join_set.join_next().await {
            let row = res.map_err(|e| anyhow::anyhow!("evaluation task failed: {}", e))?;
            if let Err(e) = &row.outcome {
                tracing::warn!(index = row.index, kind = ?e.kind(), error = %e, "evaluation failed");
            }
            rows.push(row);
        }

        rows.sort_by_key(|r| r.index);

        let report = RunReport {
            metric: self.metric.name().to_string(),
            fingerprint: self.metric.fingerprint(),
            rows,
        };
        let summary = report.summary();
        tracing::info!(
            complete = summary.complete,
            incomplete = summary.incomplete,
            errored = summary.errored,
            "evaluation run finished"
        );
        Ok(report)
    }
}
