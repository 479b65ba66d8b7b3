//! Suggestion synthesis from both scorers' rationales.

use std::sync::Arc;

use tracing::debug;

use crate::hashing::normalize_prompt;
use crate::llm::{ChatTransport, LlmClient};

use super::types::{EmpiricalResult, JudgeResult};

/// Asks the model for a refined prompt expected to score higher.
pub struct SuggestionSynthesizer<T: ChatTransport> {
    client: Arc<LlmClient<T>>,
}

impl<T: ChatTransport> SuggestionSynthesizer<T> {
    pub fn new(client: Arc<LlmClient<T>>) -> Self {
        Self { client }
    }

    /// Always returns a non-empty prompt; upstream failures fall back to the
    /// normalized original.
    pub async fn synthesize(
        &self,
        prompt: &str,
        llm: &JudgeResult,
        empirical: &EmpiricalResult,
    ) -> String {
        let suggested = self
            .client
            .suggest(prompt, &llm.reasons, &empirical.reasons)
            .await;

        if suggested.trim().is_empty() {
            debug!("blank suggestion, falling back to original prompt");
            return normalize_prompt(prompt);
        }

        suggested
    }
}
