//! The scoring coordinator: validation, caching, single-flight, parallel
//! scorer fan-out, and score combination.

pub mod error;
pub mod singleflight;

#[cfg(test)]
mod tests;

pub use error::ScoreError;
pub use singleflight::FlightGroup;

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument};

use crate::cache::ScoreCache;
use crate::config::Config;
use crate::hashing::{cache_key, normalize_prompt};
use crate::llm::{ChatTransport, LlmClient};
use crate::scoring::{EmpiricalScorer, JudgeScorer, ScoreRecord, SuggestionSynthesizer};

/// Maximum accepted prompt size after normalization.
pub const MAX_PROMPT_BYTES: usize = 8 * 1024;

const LLM_WEIGHT: f64 = 0.6;
const EMPIRICAL_WEIGHT: f64 = 0.4;

/// Orchestrates the judge and empirical scorers, combines their scores,
/// synthesizes a suggestion, and memoizes the record by prompt fingerprint.
pub struct ScoringPipeline<T: ChatTransport, C: ScoreCache> {
    judge: JudgeScorer<T>,
    empirical: EmpiricalScorer<T>,
    synthesizer: SuggestionSynthesizer<T>,
    cache: C,
    flights: FlightGroup,
    model: String,
    ttl: Duration,
}

impl<T: ChatTransport, C: ScoreCache> ScoringPipeline<T, C> {
    pub fn new(client: LlmClient<T>, cache: C, config: &Config) -> Self {
        let client = Arc::new(client);
        Self {
            judge: JudgeScorer::new(client.clone()),
            empirical: EmpiricalScorer::new(client.clone(), config.empirical_runs),
            synthesizer: SuggestionSynthesizer::new(client),
            cache,
            flights: FlightGroup::new(),
            model: config.model.clone(),
            ttl: config.score_ttl,
        }
    }

    /// Model id used for upstream calls and cache keys.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Scores a prompt, serving repeats from the cache.
    ///
    /// Only input validation can fail; upstream faults degrade into the
    /// returned record. Dropping the returned future aborts in-flight
    /// upstream calls and skips the cache write.
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    pub async fn score(&self, prompt: &str) -> Result<ScoreRecord, ScoreError> {
        let normalized = normalize_prompt(prompt);
        if normalized.is_empty() {
            return Err(ScoreError::EmptyPrompt);
        }
        if normalized.len() > MAX_PROMPT_BYTES {
            return Err(ScoreError::PromptTooLong {
                limit: MAX_PROMPT_BYTES,
            });
        }

        let key = cache_key(&normalized, &self.model);
        if let Some(record) = self.cache.read(&key).await {
            debug!("cache hit");
            return Ok(record);
        }

        let _flight = self.flights.acquire(&key).await;
        if let Some(record) = self.cache.read(&key).await {
            debug!("cache hit after flight wait");
            return Ok(record);
        }

        // both scorers run to completion; neither cancels the other
        let (llm, empirical) = tokio::join!(
            self.judge.evaluate(&normalized),
            self.empirical.evaluate(&normalized),
        );

        let average = combined_average(llm.score, empirical.score);
        let suggested_prompt = self
            .synthesizer
            .synthesize(&normalized, &llm, &empirical)
            .await;

        let record = ScoreRecord {
            llm,
            empirical,
            average,
            suggested_prompt,
        };
        self.cache.write(&key, record.clone(), self.ttl).await;

        info!(
            average = record.average,
            llm = record.llm.score,
            empirical = record.empirical.score,
            "prompt scored"
        );
        Ok(record)
    }
}

/// Combines the two sub-scores into the reported average.
///
/// The empirical term is halved on top of its weight; callers depend on the
/// historical formula, so the precedence here is load-bearing.
fn combined_average(llm: u8, empirical: u8) -> u8 {
    let average =
        (f64::from(llm) * LLM_WEIGHT + (f64::from(empirical) * EMPIRICAL_WEIGHT) / 2.0).round();
    average.clamp(0.0, 100.0) as u8
}
