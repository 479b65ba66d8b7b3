//! End-to-end tests over a real listener, mirroring how a deployed instance
//! is driven: HTTP in, JSON record out.

use std::sync::Arc;

use tokio::net::TcpListener;

use promptgauge::llm::mock::{MockChatTransport, chat_exchange};
use promptgauge::{Config, InMemoryScoreCache, LlmClient, ScoringPipeline};
use promptgauge_server::gateway::{HandlerState, create_router_with_state};

async fn spawn_server(transport: MockChatTransport) -> String {
    let config = Config {
        empirical_runs: 2,
        ..Config::default()
    };
    let client = LlmClient::new(transport, &config);
    let pipeline = Arc::new(ScoringPipeline::new(
        client,
        InMemoryScoreCache::new(),
        &config,
    ));
    let app = create_router_with_state(HandlerState::new(pipeline));

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server runs");
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn test_score_round_trip_over_http() {
    let transport = MockChatTransport::new();
    transport.push_judge(Ok(chat_exchange(
        r#"{"score": 82, "reasons": ["clear request"]}"#,
    )));
    let base = spawn_server(transport).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{base}/api/v1/score"))
        .json(&serde_json::json!({ "prompt": "Explain MVC in 3 bullets" }))
        .send()
        .await
        .expect("request succeeds");

    assert_eq!(response.status(), 200);
    let record: serde_json::Value = response.json().await.expect("json body");
    assert_eq!(record["llm"]["score"], 82);
    assert!(record["average"].as_u64().is_some());
    assert!(
        !record["suggested_prompt"]
            .as_str()
            .unwrap_or_default()
            .is_empty()
    );
}

#[tokio::test]
async fn test_empty_prompt_round_trip_returns_422() {
    let base = spawn_server(MockChatTransport::new()).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{base}/api/v1/score"))
        .json(&serde_json::json!({ "prompt": "" }))
        .send()
        .await
        .expect("request succeeds");

    assert_eq!(response.status(), 422);
    let body: serde_json::Value = response.json().await.expect("json body");
    assert_eq!(body["error"], "prompt is required");
}

#[tokio::test]
async fn test_repeat_call_is_cached() {
    let transport = MockChatTransport::new();
    let base = spawn_server(transport.clone()).await;

    let client = reqwest::Client::new();
    let body = serde_json::json!({ "prompt": "Summarize the request lifecycle" });

    let first: serde_json::Value = client
        .post(format!("{base}/api/v1/score"))
        .json(&body)
        .send()
        .await
        .expect("first request")
        .json()
        .await
        .expect("first body");
    let second: serde_json::Value = client
        .post(format!("{base}/api/v1/score"))
        .json(&body)
        .send()
        .await
        .expect("second request")
        .json()
        .await
        .expect("second body");

    assert_eq!(first, second);
    assert_eq!(transport.judge_calls(), 1);
    assert_eq!(transport.complete_calls(), 2);
}

#[tokio::test]
async fn test_health_endpoints_respond() {
    let base = spawn_server(MockChatTransport::new()).await;

    let client = reqwest::Client::new();

    let health = client
        .get(format!("{base}/healthz"))
        .send()
        .await
        .expect("healthz");
    assert_eq!(health.status(), 200);

    let ready = client
        .get(format!("{base}/ready"))
        .send()
        .await
        .expect("ready");
    assert_eq!(ready.status(), 200);
    let body: serde_json::Value = ready.json().await.expect("ready body");
    assert_eq!(body["model"], "gpt-4o-mini");
}
