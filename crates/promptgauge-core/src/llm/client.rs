//! The three call shapes against the chat-completions endpoint.
//!
//! The endpoint is the sole upstream dependency, so all timeout, retry, and
//! JSON-salvage policy lives here. None of the calls fails upward: every
//! fault degrades to a diagnostic reply the scorers can absorb.

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::Config;
use crate::hashing::normalize_prompt;

use super::json;
use super::prompts::{JUDGE_RUBRIC, SUGGEST_RUBRIC};
use super::transport::{ChatExchange, ChatTransport};
use super::types::{ChatMessage, ChatRequest, ResponseFormat};

const JUDGE_TEMPERATURE: f32 = 0.0;
const JUDGE_MAX_TOKENS: u32 = 200;
const JUDGE_MAX_RETRIES: u32 = 3;
const COMPLETE_MAX_RETRIES: u32 = 2;
const SUGGEST_TEMPERATURE: f32 = 0.2;
const BACKOFF_BASE: Duration = Duration::from_millis(400);

/// Loosely-typed judge verdict as returned by the upstream model.
///
/// `score` is whatever number the model produced; coercion and clamping
/// belong to [`crate::scoring::JudgeScorer`]. `reasons` is `None` when the
/// model omitted the field entirely.
#[derive(Debug, Clone)]
pub struct JudgeReply {
    pub score: f64,
    pub reasons: Option<Vec<String>>,
    /// Literal content (or body) the verdict was read from, for debugging.
    pub raw: Option<String>,
}

impl JudgeReply {
    fn degraded(reason: impl Into<String>, raw: Option<String>) -> Self {
        Self {
            score: 0.0,
            reasons: Some(vec![reason.into()]),
            raw,
        }
    }
}

/// Typed access to an OpenAI-compatible chat-completions endpoint.
pub struct LlmClient<T: ChatTransport> {
    transport: T,
    model: String,
    judge_timeout: Duration,
    complete_timeout: Duration,
    suggest_timeout: Duration,
    complete_max_tokens: u32,
}

impl<T: ChatTransport> LlmClient<T> {
    pub fn new(transport: T, config: &Config) -> Self {
        Self {
            transport,
            model: config.model.clone(),
            judge_timeout: config.judge_timeout,
            complete_timeout: config.complete_timeout,
            suggest_timeout: config.suggest_timeout,
            complete_max_tokens: config.empirical_max_tokens,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Rates a prompt against the fixed judge rubric.
    ///
    /// Transport errors and HTTP 429/5xx are retried up to three times with
    /// exponential backoff starting at 400 ms.
    pub async fn judge(&self, prompt: &str) -> JudgeReply {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(JUDGE_RUBRIC), ChatMessage::user(prompt)],
            temperature: JUDGE_TEMPERATURE,
            response_format: Some(ResponseFormat::json_object()),
            max_tokens: Some(JUDGE_MAX_TOKENS),
        };

        let mut attempts = 0u32;
        loop {
            attempts += 1;
            let exchange = match self.transport.send(&request, self.judge_timeout).await {
                Ok(exchange) => exchange,
                Err(err) => {
                    if attempts <= JUDGE_MAX_RETRIES {
                        warn!(attempt = attempts, error = %err, "judge transport error, retrying");
                        sleep_backoff(attempts).await;
                        continue;
                    }
                    return JudgeReply::degraded(format!("judge unavailable: {err}"), None);
                }
            };

            if exchange.status != 200 {
                if (exchange.status >= 500 || exchange.status == 429)
                    && attempts <= JUDGE_MAX_RETRIES
                {
                    warn!(
                        attempt = attempts,
                        status = exchange.status,
                        "judge transient http error, retrying"
                    );
                    sleep_backoff(attempts).await;
                    continue;
                }
                return JudgeReply::degraded(
                    format!("judge http {}", exchange.status),
                    Some(exchange.body),
                );
            }

            return parse_judge_exchange(exchange);
        }
    }

    /// Runs the prompt as a bare user message and returns the assistant text.
    ///
    /// Returns `""` on any failure. Transport errors are retried twice
    /// without backoff; non-2xx bodies carry no content and fall through to
    /// an empty string.
    pub async fn complete(&self, prompt: &str, temperature: f32) -> String {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
            temperature,
            response_format: None,
            max_tokens: Some(self.complete_max_tokens),
        };

        let mut attempts = 0u32;
        loop {
            attempts += 1;
            match self.transport.send(&request, self.complete_timeout).await {
                Ok(exchange) => {
                    let body: serde_json::Value =
                        serde_json::from_str(&exchange.body).unwrap_or_default();
                    let content = content_from_body(&body);
                    debug!(
                        status = exchange.status,
                        content_len = content.len(),
                        "completion finished"
                    );
                    return content;
                }
                Err(err) => {
                    if attempts <= COMPLETE_MAX_RETRIES {
                        warn!(attempt = attempts, error = %err, "completion transport error, retrying");
                        continue;
                    }
                    warn!(error = %err, "completion failed, returning empty sample");
                    return String::new();
                }
            }
        }
    }

    /// Asks the model for a refined prompt given both scorers' reasons.
    ///
    /// Falls back to the normalized original prompt on any failure.
    pub async fn suggest(
        &self,
        original: &str,
        judge_reasons: &[String],
        empirical_reasons: &[String],
    ) -> String {
        let normalized = normalize_prompt(original);

        let user_content = format!(
            "Original prompt:\n{}\n\nLLM judge reasons:\n{}\n\nEmpirical judge reasons:\n{}\n",
            normalized,
            bullet_list(judge_reasons),
            bullet_list(empirical_reasons),
        );

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(SUGGEST_RUBRIC),
                ChatMessage::user(user_content),
            ],
            temperature: SUGGEST_TEMPERATURE,
            response_format: Some(ResponseFormat::json_object()),
            max_tokens: None,
        };

        let exchange = match self.transport.send(&request, self.suggest_timeout).await {
            Ok(exchange) => exchange,
            Err(err) => {
                warn!(error = %err, "suggestion transport error, falling back to original prompt");
                return normalized;
            }
        };

        let body: serde_json::Value = serde_json::from_str(&exchange.body).unwrap_or_default();
        let content = content_from_body(&body);

        match json::parse_object_lossy(content.trim()).and_then(|v| {
            v.get("suggested_prompt")
                .and_then(|s| s.as_str())
                .map(str::to_string)
        }) {
            Some(suggested) if !suggested.trim().is_empty() => suggested,
            _ => {
                debug!("no usable suggestion in response, falling back to original prompt");
                normalized
            }
        }
    }
}

fn parse_judge_exchange(exchange: ChatExchange) -> JudgeReply {
    let body: serde_json::Value = serde_json::from_str(&exchange.body).unwrap_or_default();

    if body.get("error").is_some() {
        let message = body
            .pointer("/error/message")
            .and_then(|m| m.as_str())
            .unwrap_or_default();
        return JudgeReply::degraded(format!("judge error: {message}"), Some(exchange.body));
    }

    let content = content_from_body(&body);
    debug!(content_len = content.len(), "judge response content");

    match json::parse_object_lossy(&content) {
        Some(verdict) if verdict.get("score").is_some() => JudgeReply {
            score: number_from_value(verdict.get("score")),
            reasons: reasons_from_value(verdict.get("reasons")),
            raw: Some(content),
        },
        _ => JudgeReply::degraded("invalid json from judge", Some(content)),
    }
}

fn content_from_body(body: &serde_json::Value) -> String {
    body.pointer("/choices/0/message/content")
        .and_then(|c| c.as_str())
        .unwrap_or_default()
        .to_string()
}

fn number_from_value(value: Option<&serde_json::Value>) -> f64 {
    match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn reasons_from_value(value: Option<&serde_json::Value>) -> Option<Vec<String>> {
    let items = value?.as_array()?;
    Some(
        items
            .iter()
            .map(|v| match v {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
    )
}

fn bullet_list(reasons: &[String]) -> String {
    reasons
        .iter()
        .map(|r| format!("- {r}"))
        .collect::<Vec<_>>()
        .join("\n")
}

async fn sleep_backoff(attempt: u32) {
    let delay = BACKOFF_BASE * 2u32.saturating_pow(attempt.saturating_sub(1));
    tokio::time::sleep(delay).await;
}
