//! Scripted transport for tests.
//!
//! Responses are routed by call shape (judge / complete / suggest) rather
//! than by a single queue: the pipeline issues the shapes concurrently, so
//! queue order would be nondeterministic.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::transport::{ChatExchange, ChatTransport, TransportError};
use super::types::ChatRequest;

const DEFAULT_JUDGE_CONTENT: &str = r#"{"score": 75, "reasons": ["default mock rating"]}"#;
const DEFAULT_COMPLETE_CONTENT: &str = "Mock completion response.";
const DEFAULT_SUGGEST_CONTENT: &str = r#"{"suggested_prompt": "Mock refined prompt"}"#;

type ScriptedResult = Result<ChatExchange, TransportError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallKind {
    Judge,
    Complete,
    Suggest,
}

#[derive(Debug, Default)]
struct MockState {
    judge: VecDeque<ScriptedResult>,
    complete: VecDeque<ScriptedResult>,
    suggest: VecDeque<ScriptedResult>,
    judge_calls: usize,
    complete_calls: usize,
    suggest_calls: usize,
    latency: Option<Duration>,
}

/// Scripted [`ChatTransport`] with per-shape response queues and counters.
///
/// When a queue is exhausted, a benign default response is served so tests
/// can script only the shape under test. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockChatTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockChatTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds artificial latency to every response, to widen concurrency
    /// windows in tests.
    pub fn set_latency(&self, latency: Duration) {
        self.state.lock().latency = Some(latency);
    }

    pub fn push_judge(&self, result: ScriptedResult) {
        self.state.lock().judge.push_back(result);
    }

    pub fn push_complete(&self, result: ScriptedResult) {
        self.state.lock().complete.push_back(result);
    }

    pub fn push_suggest(&self, result: ScriptedResult) {
        self.state.lock().suggest.push_back(result);
    }

    pub fn judge_calls(&self) -> usize {
        self.state.lock().judge_calls
    }

    pub fn complete_calls(&self) -> usize {
        self.state.lock().complete_calls
    }

    pub fn suggest_calls(&self) -> usize {
        self.state.lock().suggest_calls
    }
}

#[async_trait]
impl ChatTransport for MockChatTransport {
    async fn send(
        &self,
        request: &ChatRequest,
        _timeout: Duration,
    ) -> Result<ChatExchange, TransportError> {
        let (latency, result) = {
            let mut state = self.state.lock();
            let result = match classify(request) {
                CallKind::Judge => {
                    state.judge_calls += 1;
                    state
                        .judge
                        .pop_front()
                        .unwrap_or_else(|| Ok(chat_exchange(DEFAULT_JUDGE_CONTENT)))
                }
                CallKind::Complete => {
                    state.complete_calls += 1;
                    state
                        .complete
                        .pop_front()
                        .unwrap_or_else(|| Ok(chat_exchange(DEFAULT_COMPLETE_CONTENT)))
                }
                CallKind::Suggest => {
                    state.suggest_calls += 1;
                    state
                        .suggest
                        .pop_front()
                        .unwrap_or_else(|| Ok(chat_exchange(DEFAULT_SUGGEST_CONTENT)))
                }
            };
            (state.latency, result)
        };

        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        result
    }
}

fn classify(request: &ChatRequest) -> CallKind {
    match request.messages.first() {
        Some(msg) if msg.role == "system" && msg.content.contains("Prompt Refinement") => {
            CallKind::Suggest
        }
        Some(msg) if msg.role == "system" => CallKind::Judge,
        _ => CallKind::Complete,
    }
}

/// Wraps assistant `content` in an OpenAI-shaped 200 response.
pub fn chat_exchange(content: &str) -> ChatExchange {
    let body = serde_json::json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    });
    ChatExchange {
        status: 200,
        body: body.to_string(),
    }
}

/// An exchange with an arbitrary status and raw body.
pub fn http_exchange(status: u16, body: &str) -> ChatExchange {
    ChatExchange {
        status,
        body: body.to_string(),
    }
}
