//! End-to-end completeness scenarios against a deterministic in-process model.

use arbiter_core::engine::Runner;
use arbiter_core::judge::{Judge, JudgeConfig};
use arbiter_core::metrics_api::{Metric, MetricConfig};
use arbiter_core::model::EvaluationInput;
use arbiter_core::providers::llm::fake::FakeClient;
use arbiter_metrics::CompletenessMetric;
use std::sync::Arc;

const PASTA_REQUEST: &str = "simple pasta recipe with exact measurements and timing";

const PASTA_COMPLETE: &str = "\
1. Bring 4 l water with 1 tbsp salt to a boil over high heat (about 10 minutes).
2. Cook 400 g spaghetti for 9 minutes at a rolling boil.
3. Meanwhile warm 3 tbsp olive oil with 2 sliced garlic cloves over medium-low heat for 2 minutes.
4. Toss the drained pasta in the oil for 1 minute over medium heat; finish with 30 g grated parmesan.";

const LASAGNA_NO_TEMP: &str = "\
1. Brown 500 g minced beef for 8 minutes over medium-high heat.
2. Add 700 ml passata and simmer for 25 minutes over low heat.
3. Layer with 12 lasagna sheets and 400 ml bechamel.
4. Bake in the oven for 40 minutes, then rest for 10 minutes.";

fn metric_with(client: Arc<FakeClient>, scale: f64) -> CompletenessMetric {
    let judge = Judge::new(JudgeConfig::completeness(client)).unwrap();
    CompletenessMetric::new(judge, MetricConfig::with_scale(scale)).unwrap()
}

#[tokio::test]
async fn scenario_complete_pasta_recipe_scores_scale() {
    let client = Arc::new(
        FakeClient::new("judge")
            .with_response("verdict", r#"{"missing": [], "verdict": "Complete"}"#)
            .with_response(
                "reason",
                r#"{"reason": "The recipe is complete: every step states its quantity, time and heat level, so all essential components are present."}"#,
            ),
    );
    let metric = CompletenessMetric::with_client(client).unwrap();

    let res = metric.measure(PASTA_REQUEST, PASTA_COMPLETE).await.unwrap();
    assert_eq!(res.score, 1.0);
    assert!(res.info.missing_elements.is_empty());
    assert!(res.info.reason.contains("all essential components are present"));
}

#[tokio::test]
async fn scenario_missing_oven_temperature_scores_zero() {
    let client = Arc::new(
        FakeClient::new("judge")
            .with_response(
                "verdict",
                "```json\n{\"missing\": [\"baking temperature\"], \"verdict\": \"Incomplete\"}\n```",
            )
            .with_response(
                "reason",
                r#"{"reason": "The recipe is incomplete because it never gives the baking temperature for the oven."}"#,
            ),
    );
    let metric = metric_with(client, 1.0);

    let res = metric
        .measure("classic beef lasagna", LASAGNA_NO_TEMP)
        .await
        .unwrap();
    assert_eq!(res.score, 0.0);
    assert_eq!(res.info.missing_elements, vec!["baking temperature"]);
    assert!(res.info.reason.contains("temperature"));
}

#[tokio::test]
async fn score_is_zero_or_scale_for_every_label_spelling() {
    let cases = [
        ("Complete", 7.5),
        ("complete", 7.5),
        ("COMPLETE", 7.5),
        ("Incomplete", 0.0),
        ("incomplete", 0.0),
        ("iNcOmPlEtE", 0.0),
    ];
    for (label, expected) in cases {
        let client = Arc::new(
            FakeClient::new("judge")
                .with_response(
                    "verdict",
                    format!(r#"{{"missing": [], "verdict": "{label}"}}"#),
                )
                .with_response("reason", r#"{"reason": "r"}"#),
        );
        let res = metric_with(client, 7.5)
            .measure(PASTA_REQUEST, PASTA_COMPLETE)
            .await
            .unwrap();
        assert_eq!(res.score, expected, "label {label}");
    }
}

// A judge may contradict itself. The score follows the label; the list is passed through.
#[tokio::test]
async fn complete_label_with_missing_elements_still_scores_scale() {
    let client = Arc::new(
        FakeClient::new("judge")
            .with_response(
                "verdict",
                r#"{"missing": ["serving size"], "verdict": "Complete"}"#,
            )
            .with_response("reason", r#"{"reason": "Essentials present; serving size absent."}"#),
    );
    let res = metric_with(client, 1.0)
        .measure(PASTA_REQUEST, PASTA_COMPLETE)
        .await
        .unwrap();
    assert_eq!(res.score, 1.0);
    assert_eq!(res.info.missing_elements, vec!["serving size"]);
}

#[tokio::test]
async fn repeated_measure_is_idempotent() {
    let client = Arc::new(
        FakeClient::new("judge")
            .with_response(
                "verdict",
                r#"{"missing": ["baking temperature"], "verdict": "Incomplete"}"#,
            )
            .with_response("reason", r#"{"reason": "No oven temperature."}"#),
    );
    let metric = metric_with(client.clone(), 1.0);

    let first = metric.measure("lasagna", LASAGNA_NO_TEMP).await.unwrap();
    let second = metric.measure("lasagna", LASAGNA_NO_TEMP).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(client.calls(), vec!["verdict", "reason", "verdict", "reason"]);
}

#[tokio::test]
async fn result_serializes_with_documented_shape() {
    let client = Arc::new(
        FakeClient::new("judge")
            .with_response(
                "verdict",
                r#"{"missing": ["baking temperature"], "verdict": "Incomplete"}"#,
            )
            .with_response("reason", r#"{"reason": "No oven temperature."}"#),
    );
    let res = metric_with(client, 1.0)
        .measure("lasagna", LASAGNA_NO_TEMP)
        .await
        .unwrap();

    let v = serde_json::to_value(&res).unwrap();
    assert_eq!(
        v,
        serde_json::json!({
            "score": 0.0,
            "info": {
                "missingElements": ["baking temperature"],
                "reason": "No oven temperature."
            }
        })
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn batch_run_over_shared_metric() {
    let client = Arc::new(
        FakeClient::new("judge")
            .with_response("verdict", r#"{"missing": [], "verdict": "Complete"}"#)
            .with_response("reason", r#"{"reason": "All present."}"#),
    );
    let metric: Arc<dyn Metric> = Arc::new(metric_with(client.clone(), 2.0));
    let runner = Runner::new(metric, 3).unwrap();

    let cases: Vec<EvaluationInput> = (0..10)
        .map(|i| EvaluationInput::new(format!("recipe {i}"), PASTA_COMPLETE))
        .collect();
    let report = runner.run(cases).await.unwrap();

    assert_eq!(report.rows.len(), 10);
    assert!(report.fingerprint.is_some());
    for (i, row) in report.rows.iter().enumerate() {
        assert_eq!(row.index, i);
        assert_eq!(row.outcome.as_ref().unwrap().score, 2.0);
    }
    let summary = report.summary();
    assert_eq!(summary.complete, 10);
    assert_eq!(summary.incomplete, 0);
    assert_eq!(summary.mean_score, Some(2.0));
    assert_eq!(client.call_count("verdict"), 10);
    assert_eq!(client.call_count("reason"), 10);
}
