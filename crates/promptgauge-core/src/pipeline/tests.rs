use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::cache::InMemoryScoreCache;
use crate::llm::mock::{MockChatTransport, chat_exchange};
use crate::llm::{LlmClient, TransportError};

const STABLE_JSON_OUTPUT: &str = r#"{"steps":["a","b"],"risks":["x"]}"#;

fn test_config() -> Config {
    Config {
        empirical_runs: 2,
        score_ttl: Duration::from_secs(60),
        ..Config::default()
    }
}

fn pipeline_over(
    transport: MockChatTransport,
) -> ScoringPipeline<MockChatTransport, InMemoryScoreCache> {
    let config = test_config();
    let client = LlmClient::new(transport, &config);
    ScoringPipeline::new(client, InMemoryScoreCache::new(), &config)
}

#[tokio::test]
async fn test_empty_prompt_rejected_without_upstream_calls() {
    let transport = MockChatTransport::new();
    let pipeline = pipeline_over(transport.clone());

    assert_eq!(pipeline.score("").await, Err(ScoreError::EmptyPrompt));
    assert_eq!(pipeline.score("   \n\t ").await, Err(ScoreError::EmptyPrompt));

    assert_eq!(transport.judge_calls(), 0);
    assert_eq!(transport.complete_calls(), 0);
    assert_eq!(transport.suggest_calls(), 0);
}

#[tokio::test]
async fn test_oversized_prompt_rejected() {
    let transport = MockChatTransport::new();
    let pipeline = pipeline_over(transport.clone());

    let oversized = "x".repeat(MAX_PROMPT_BYTES + 1);
    assert_eq!(
        pipeline.score(&oversized).await,
        Err(ScoreError::PromptTooLong {
            limit: MAX_PROMPT_BYTES
        })
    );
    assert_eq!(transport.judge_calls(), 0);
}

#[tokio::test]
async fn test_second_call_is_served_from_cache() {
    let transport = MockChatTransport::new();
    transport.push_judge(Ok(chat_exchange(r#"{"score": 80, "reasons": ["clear"]}"#)));
    let pipeline = pipeline_over(transport.clone());

    let first = pipeline
        .score("Explain MVC in 3 bullets")
        .await
        .expect("first call scores");
    let second = pipeline
        .score("Explain MVC in 3 bullets")
        .await
        .expect("second call scores");

    assert_eq!(first, second);
    assert_eq!(transport.judge_calls(), 1);
    assert_eq!(transport.complete_calls(), 2);
    assert_eq!(transport.suggest_calls(), 1);
}

#[tokio::test]
async fn test_normalized_prompts_share_cache_entry() {
    let transport = MockChatTransport::new();
    let pipeline = pipeline_over(transport.clone());

    let first = pipeline
        .score("  hello   world ")
        .await
        .expect("first call scores");
    let second = pipeline.score("hello world").await.expect("second call scores");

    assert_eq!(first, second);
    assert_eq!(transport.judge_calls(), 1);
}

#[tokio::test]
async fn test_single_flight_deduplicates_concurrent_calls() {
    let transport = MockChatTransport::new();
    transport.set_latency(Duration::from_millis(50));
    let pipeline = Arc::new(pipeline_over(transport.clone()));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let pipeline = pipeline.clone();
        handles.push(tokio::spawn(async move {
            pipeline.score("Explain MVC in 3 bullets").await
        }));
    }

    let mut records = Vec::new();
    for handle in handles {
        records.push(handle.await.expect("task completes").expect("scores"));
    }

    for record in &records[1..] {
        assert_eq!(record, &records[0]);
    }
    assert_eq!(transport.judge_calls(), 1);
    assert_eq!(transport.complete_calls(), 2);
    assert_eq!(transport.suggest_calls(), 1);
}

#[tokio::test]
async fn test_average_reproduces_legacy_formula() {
    let transport = MockChatTransport::new();
    transport.push_judge(Ok(chat_exchange(r#"{"score": 80, "reasons": ["clear"]}"#)));
    transport.push_complete(Ok(chat_exchange(STABLE_JSON_OUTPUT)));
    transport.push_complete(Ok(chat_exchange(STABLE_JSON_OUTPUT)));
    let pipeline = pipeline_over(transport);

    let record = pipeline
        .score("List deployment steps as JSON")
        .await
        .expect("scores");

    assert_eq!(record.llm.score, 80);
    assert_eq!(record.empirical.score, 63);
    assert_eq!(record.empirical.details.variance, 0.0);
    // round(80 * 0.6 + (63 * 0.4) / 2.0) = round(60.6) — the empirical term
    // is halved on top of its weight
    assert_eq!(record.average, 61);
}

#[tokio::test(start_paused = true)]
async fn test_judge_hard_failure_still_yields_record() {
    let transport = MockChatTransport::new();
    for _ in 0..4 {
        transport.push_judge(Err(TransportError::Connection("refused".to_string())));
    }
    let pipeline = pipeline_over(transport);

    let record = pipeline.score("Explain MVC").await.expect("scores");

    assert_eq!(record.llm.score, 0);
    assert!(record.llm.reasons[0].contains("judge unavailable"));
    assert!(record.average <= 100);
    assert!(!record.suggested_prompt.is_empty());
}

#[tokio::test]
async fn test_suggestion_failure_falls_back_to_normalized_prompt() {
    let transport = MockChatTransport::new();
    transport.push_suggest(Err(TransportError::Connection("refused".to_string())));
    let pipeline = pipeline_over(transport);

    let record = pipeline.score("  Explain   MVC  ").await.expect("scores");

    assert_eq!(record.suggested_prompt, "Explain MVC");
}

#[test]
fn test_combined_average_edges() {
    assert_eq!(combined_average(0, 0), 0);
    assert_eq!(combined_average(100, 100), 80);
    assert_eq!(combined_average(100, 0), 60);
    assert_eq!(combined_average(0, 100), 20);
}
