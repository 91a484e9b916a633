//! End-to-end tests of the reqwest transport against a local axum mock of the API.

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use text_insight::{
    ApiConfig, Credential, FailureReporter, InsightError, Operation, Sentiment, SentimentResult,
    SummaryResult, TextInsightClient,
};

#[derive(Default)]
struct CountingReporter {
    seen: Mutex<Vec<(Operation, String)>>,
}

impl FailureReporter for CountingReporter {
    fn report(&self, operation: Operation, cause: &InsightError) {
        self.seen.lock().unwrap().push((operation, cause.to_string()));
    }
}

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base_url: &str, timeout_ms: u64) -> (TextInsightClient, Arc<CountingReporter>) {
    let api = ApiConfig {
        base_url: base_url.to_string(),
        timeout_ms,
    };
    let reporter = Arc::new(CountingReporter::default());
    let client = TextInsightClient::new(Credential::new("test-token").unwrap(), &api)
        .unwrap()
        .with_reporter(reporter.clone());
    (client, reporter)
}

fn summarize_router() -> Router {
    Router::new().route(
        "/summarize",
        post(|Json(body): Json<Value>| async move {
            match body["style"].as_str() {
                Some("brief") => Json(json!({"summary": "brief summary"})),
                Some("bullet_points") => Json(json!({"summaries": ["a", "b", "c"]})),
                _ => Json(json!({"summary": "impact text"})),
            }
        }),
    )
}

#[tokio::test]
async fn sentiment_sends_auth_headers_and_maps_response() {
    let captured: Arc<Mutex<Option<(HeaderMap, Value)>>> = Arc::default();
    let sink = captured.clone();
    let app = Router::new().route(
        "/sentiment",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let sink = sink.clone();
            async move {
                *sink.lock().unwrap() = Some((headers, body));
                Json(json!({
                    "sentiment": 2,
                    "confidence": 0.91,
                    "scores": {"negative": 0.03, "neutral": 0.06, "positive": 0.91}
                }))
            }
        }),
    );
    let base = spawn(app).await;
    let (client, reporter) = client(&base, 5_000);

    let outcome = client.classify_sentiment("Shares surged 15% today").await;
    assert!(!outcome.is_degraded());
    let result = outcome.into_value();
    assert_eq!(result.overall_sentiment, Sentiment::Positive);
    assert_eq!(
        result.explanation.as_deref(),
        Some("Strong positive sentiment detected")
    );
    assert_eq!(result.confidence, 0.91);
    assert_eq!(result.scores.as_ref().map(|s| s.len()), Some(3));
    assert!(reporter.seen.lock().unwrap().is_empty());

    let (headers, body) = captured.lock().unwrap().take().unwrap();
    assert_eq!(headers[header::AUTHORIZATION], "Bearer test-token");
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(body, json!({"text": "Shares surged 15% today"}));
}

#[tokio::test]
async fn sentiment_connection_refused_degrades_with_one_report() {
    // Grab a free port, then close it so nothing is listening there
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let (client, reporter) = client(&base, 2_000);
    let outcome = client.classify_sentiment("anything").await;

    assert!(outcome.is_degraded());
    assert_eq!(outcome.value(), &SentimentResult::degraded());
    assert_eq!(outcome.value().overall_sentiment, Sentiment::Neutral);
    assert_eq!(outcome.value().confidence, 0.0);

    let seen = reporter.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, Operation::SentimentAnalysis);
}

#[tokio::test]
async fn sentiment_non_success_status_is_reported_with_body() {
    let app = Router::new().route(
        "/sentiment",
        post(|| async { (StatusCode::UNAUTHORIZED, "invalid api key") }),
    );
    let base = spawn(app).await;
    let (client, reporter) = client(&base, 5_000);

    match client.try_classify_sentiment("x").await {
        Err(InsightError::Status { status, body }) => {
            assert_eq!(status, 401);
            assert_eq!(body, "invalid api key");
        }
        other => panic!("expected Status error, got {other:?}"),
    }

    let outcome = client.classify_sentiment("x").await;
    assert!(outcome.is_degraded());
    assert!(outcome.cause().unwrap().contains("401"));
    assert_eq!(reporter.seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn sentiment_malformed_body_is_decode_error() {
    let app = Router::new().route(
        "/sentiment",
        post(|| async {
            ([(header::CONTENT_TYPE, "application/json")], "{\"sentiment\": ").into_response()
        }),
    );
    let base = spawn(app).await;
    let (client, _) = client(&base, 5_000);

    let err = client.try_classify_sentiment("x").await.unwrap_err();
    assert!(matches!(err, InsightError::Decode { .. }), "got {err:?}");
}

#[tokio::test]
async fn slow_service_times_out_as_transport_failure() {
    let app = Router::new().route(
        "/sentiment",
        post(|| async {
            tokio::time::sleep(Duration::from_millis(1_500)).await;
            Json(json!({"sentiment": 1, "confidence": 0.5, "scores": {}}))
        }),
    );
    let base = spawn(app).await;
    let (client, reporter) = client(&base, 200);

    let err = client.try_classify_sentiment("x").await.unwrap_err();
    match &err {
        InsightError::Timeout { timeout_ms, .. } => assert_eq!(*timeout_ms, 200),
        other => panic!("expected Timeout, got {other:?}"),
    }
    assert!(err.is_transport());

    let outcome = client.classify_sentiment("x").await;
    assert!(outcome.is_degraded());
    assert_eq!(reporter.seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn summarize_combines_three_responses() {
    let base = spawn(summarize_router()).await;
    let (client, reporter) = client(&base, 5_000);

    let outcome = client.summarize("Tesla shares surged").await;
    assert_eq!(
        outcome.into_value(),
        SummaryResult {
            brief: "brief summary".into(),
            key_points: "a b c".into(),
            market_impact: Some("impact text".into()),
        }
    );
    assert!(reporter.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn summarize_second_request_failing_degrades_everything() {
    let app = Router::new().route(
        "/summarize",
        post(|Json(body): Json<Value>| async move {
            match body["style"].as_str() {
                Some("brief") => Json(json!({"summary": "brief summary"})).into_response(),
                Some("bullet_points") => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "model crashed").into_response()
                }
                _ => Json(json!({"summary": "impact text"})).into_response(),
            }
        }),
    );
    let base = spawn(app).await;
    let (client, reporter) = client(&base, 5_000);

    let outcome = client.summarize("article").await;
    assert!(outcome.is_degraded());
    let result = outcome.value();
    assert_eq!(result.brief, "Summary unavailable");
    assert_eq!(result.key_points, "");
    assert_eq!(result.market_impact, None);

    let seen = reporter.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, Operation::SummaryGeneration);
}

#[tokio::test]
async fn summarize_missing_field_degrades() {
    let app = Router::new().route(
        "/summarize",
        post(|| async { Json(json!({"text": "wrong shape"})) }),
    );
    let base = spawn(app).await;
    let (client, reporter) = client(&base, 5_000);

    let outcome = client.summarize("article").await;
    assert_eq!(outcome.value(), &SummaryResult::degraded());
    assert_eq!(reporter.seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn analyze_and_repeat_calls_are_stable() {
    let app = summarize_router().route(
        "/sentiment",
        post(|| async { Json(json!({"sentiment": 0, "confidence": 0.65, "scores": {"negative": 0.65}})) }),
    );
    let base = spawn(app).await;
    let (client, _) = client(&base, 5_000);

    let first = client.analyze("earnings miss").await;
    let second = client.analyze("earnings miss").await;
    assert_eq!(first, second);
    assert_eq!(
        first.sentiment.value().explanation.as_deref(),
        Some("Moderate negative sentiment detected")
    );

    let rendered = serde_json::to_value(&first).unwrap();
    assert_eq!(rendered["sentiment"]["status"], "success");
    assert_eq!(rendered["summary"]["result"]["key_points"], "a b c");
}
