//! Thin adapter over the LLM judge call.

use std::sync::Arc;

use tracing::debug;

use crate::llm::{ChatTransport, LlmClient};

use super::types::JudgeResult;

/// Normalizes the judge's loose verdict into a bounded [`JudgeResult`].
pub struct JudgeScorer<T: ChatTransport> {
    client: Arc<LlmClient<T>>,
}

impl<T: ChatTransport> JudgeScorer<T> {
    pub fn new(client: Arc<LlmClient<T>>) -> Self {
        Self { client }
    }

    /// Coerces the score to an integer in `0..=100` and guarantees at least
    /// one reason.
    pub async fn evaluate(&self, prompt: &str) -> JudgeResult {
        let reply = self.client.judge(prompt).await;

        let score = (reply.score as i64).clamp(0, 100) as u8;
        let reasons = reply
            .reasons
            .unwrap_or_else(|| vec!["invalid response".to_string()]);

        debug!(score, reason_count = reasons.len(), "judge verdict");

        JudgeResult {
            score,
            reasons,
            raw: reply.raw,
        }
    }
}
