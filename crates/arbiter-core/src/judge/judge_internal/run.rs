use crate::decode::{self, ResponseShape};
use crate::errors::EvalResult;
use crate::judge::{prompt, Judge};
use crate::model::{EvaluationInput, Rationale, Verdict, VerdictLabel};
use tracing::Instrument;

pub(crate) async fn evaluate_impl(judge: &Judge, input: &EvaluationInput) -> EvalResult<Verdict> {
    let span = tracing::info_span!("judge.evaluate", judge = judge.name.as_str());
    async move {
        let prompt_text = prompt::render_verdict_prompt(input);
        let verdict = super::client::call_judge_impl(
            judge,
            &prompt_text,
            &ResponseShape::verdict(),
            decode::decode_verdict,
        )
        .await?;

        tracing::debug!(
            label = verdict.label.as_str(),
            missing = verdict.missing_elements.len(),
            "verdict decoded"
        );
        if verdict.is_complete() && !verdict.missing_elements.is_empty() {
            // Scored by label alone; logged so inconsistent judges are visible.
            tracing::warn!(
                missing = ?verdict.missing_elements,
                "judge returned Complete with missing elements"
            );
        }
        Ok(verdict)
    }
    .instrument(span)
    .await
}

pub(crate) async fn get_reason_impl(
    judge: &Judge,
    input: &EvaluationInput,
    missing_elements: &[String],
    label: VerdictLabel,
) -> EvalResult<Rationale> {
    let span = tracing::info_span!(
        "judge.get_reason",
        judge = judge.name.as_str(),
        label = label.as_str()
    );
    async move {
        let prompt_text = prompt::render_reason_prompt(input, missing_elements, label);
        super::client::call_judge_impl(
            judge,
            &prompt_text,
            &ResponseShape::reason(),
            decode::decode_rationale,
        )
        .await
    }
    .instrument(span)
    .await
}
