use crate::decode::ResponseShape;
use crate::errors::{DecodeError, EvalResult};
use crate::judge::Judge;

/// Sends one prompt to the judge's client and decodes the reply with `decode`.
///
/// Invocation failures and decode failures stay distinct on the way out.
pub(crate) async fn call_judge_impl<T>(
    judge: &Judge,
    prompt: &str,
    shape: &ResponseShape,
    decode: impl FnOnce(&str) -> Result<T, DecodeError>,
) -> EvalResult<T> {
    let resp = judge
        .client
        .complete(prompt, &judge.instructions, shape)
        .await?;

    decode(resp.text.trim()).map_err(|e| {
        tracing::warn!(
            judge = judge.name.as_str(),
            shape = shape.name(),
            provider = resp.provider.as_str(),
            error = %e,
            "judge reply rejected"
        );
        e.into()
    })
}
