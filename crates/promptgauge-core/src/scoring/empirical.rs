//! Empirical scoring: run the prompt several times and measure how it
//! behaves in practice.
//!
//! The score is the sum of three independent components, clamped to
//! `0..=100`: format adherence of the outputs (0-40), inter-run consistency
//! by edit distance (0-40), and response-quality heuristics (0-20).

use std::sync::{Arc, LazyLock};
use std::time::Instant;

use futures_util::future::join_all;
use regex::Regex;
use tracing::{debug, info};

use crate::llm::{ChatTransport, LlmClient};

use super::distance::normalized_edit_distance;
use super::types::{EmpiricalDetails, EmpiricalResult};

const SAMPLE_TEMPERATURE: f32 = 0.2;

const FORMAT_MAX: u32 = 40;
const FORMAT_SAMPLE_MAX: u32 = 20;
const CONSISTENCY_MAX: u32 = 40;
const QUALITY_MAX: u32 = 20;

/// Lowercase substrings that mark a hedged refusal; such samples earn no
/// quality points. Swappable per deployment for other locales.
pub const DEFAULT_HEDGED_PATTERNS: [&str; 3] =
    ["as an ai language model", "i cannot", "cannot assist with"];

static JSON_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""\w+"\s*:"#).expect("json key pattern is valid"));
static CODE_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(def|function|class|const|let|var)\s+\w+").expect("code pattern is valid")
});
static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:[-*•]|\d+\.)\s+\w").expect("list pattern is valid")
});
static TABLE_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\|[^\n]*\|").expect("table pattern is valid"));
static HAS_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d").expect("digit pattern is valid"));
static ACTIONABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(step|process|method|way|how|what|why|when|where)\b")
        .expect("actionable pattern is valid")
});
static ORDINAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(first|second|third|next|then|finally|also|additionally)\b")
        .expect("ordinal pattern is valid")
});

/// Scores a prompt by sampling the model and inspecting the outputs.
pub struct EmpiricalScorer<T: ChatTransport> {
    client: Arc<LlmClient<T>>,
    runs: usize,
    hedged_patterns: Vec<String>,
}

impl<T: ChatTransport> EmpiricalScorer<T> {
    pub fn new(client: Arc<LlmClient<T>>, runs: usize) -> Self {
        Self {
            client,
            runs,
            hedged_patterns: DEFAULT_HEDGED_PATTERNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Replaces the hedged-refusal pattern set (matched case-insensitively).
    pub fn with_hedged_patterns(mut self, patterns: Vec<String>) -> Self {
        self.hedged_patterns = patterns.into_iter().map(|p| p.to_lowercase()).collect();
        self
    }

    /// Runs the prompt `runs` times in parallel and scores the samples.
    ///
    /// Samples are indexed by submission order; a failed run participates as
    /// an empty string. Never fails upward.
    pub async fn evaluate(&self, prompt: &str) -> EmpiricalResult {
        let started = Instant::now();
        debug!(
            runs = self.runs,
            prompt_len = prompt.len(),
            "empirical evaluation start"
        );

        let samples = join_all(
            (0..self.runs).map(|_| self.client.complete(prompt, SAMPLE_TEMPERATURE)),
        )
        .await;

        let mut reasons = Vec::new();
        let mut score: u32 = 0;

        let (format_points, format_msgs) = format_score(&samples);
        score += format_points;
        if !format_msgs.is_empty() {
            reasons.extend(format_msgs.iter().map(|m| format!("Output structure: {m}.")));
        } else if format_points == 0 {
            reasons.push(
                "The outputs lack clear structure. Consider requesting a specific format \
                 (JSON, list, code, etc.) or asking for organized sections."
                    .to_string(),
            );
        }

        let (variance, consistency_points) = consistency_score(&samples);
        score += consistency_points;
        if samples.len() >= 2 {
            if consistency_points >= 30 {
                reasons.push(
                    "The model produced similar outputs across runs, indicating a stable prompt."
                        .to_string(),
                );
            } else {
                reasons.push(
                    "Outputs varied significantly between runs; tighten instructions and format \
                     requirements to increase consistency."
                        .to_string(),
                );
            }
        }

        let quality_points = quality_score(&samples, &self.hedged_patterns);
        score += quality_points;
        if quality_points >= 15 {
            reasons.push("The response appears substantive and actionable.".to_string());
        } else {
            reasons.push(
                "The response seems brief or generic; ask for concrete steps, numbers, or \
                 examples."
                    .to_string(),
            );
        }

        let score = score.min(100) as u8;
        info!(
            score,
            variance,
            format_points,
            consistency_points,
            quality_points,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "empirical evaluation finished"
        );

        EmpiricalResult {
            score,
            reasons,
            details: EmpiricalDetails { variance },
        }
    }
}

/// Format adherence over all samples (0-40, capped at 20 per sample).
///
/// Inspects the output text for structural cues; duplicate messages across
/// samples are reported once.
pub(crate) fn format_score(samples: &[String]) -> (u32, Vec<&'static str>) {
    let mut points = 0u32;
    let mut messages: Vec<&'static str> = Vec::new();

    for sample in samples {
        let text = sample.trim();
        if text.is_empty() {
            continue;
        }

        let mut sample_points = 0u32;
        let mut has_structure = false;

        if looks_like_json(text) {
            sample_points += 10;
            push_unique(&mut messages, "Structured JSON-like output detected");
            has_structure = true;
        }
        if CODE_DECL.is_match(text) {
            sample_points += 10;
            push_unique(&mut messages, "Code structure detected");
            has_structure = true;
        }
        if LIST_MARKER.is_match(text) {
            sample_points += 8;
            push_unique(&mut messages, "List structure detected");
            has_structure = true;
        }
        if looks_like_table(text) {
            sample_points += 8;
            push_unique(&mut messages, "Table structure detected");
            has_structure = true;
        }
        if text.lines().count() >= 3 {
            sample_points += 5;
        }
        if !has_structure && text.chars().count() >= 50 {
            sample_points += 5;
            push_unique(&mut messages, "Coherent text response");
        }

        points += sample_points.min(FORMAT_SAMPLE_MAX);
    }

    (points.min(FORMAT_MAX), messages)
}

/// Consistency over the first two samples (0-40) plus the variance.
///
/// Identical non-empty samples are perfectly consistent; fewer than two
/// samples (or two empty ones) leave the variance undefined and score zero.
pub(crate) fn consistency_score(samples: &[String]) -> (f64, u32) {
    if samples.len() < 2 {
        return (1.0, 0);
    }

    let a = &samples[0];
    let b = &samples[1];

    if a == b && !a.is_empty() {
        return (0.0, CONSISTENCY_MAX);
    }
    if a.is_empty() && b.is_empty() {
        return (1.0, 0);
    }

    let distance = normalized_edit_distance(a, b);
    let points = if distance <= 0.2 {
        40.0
    } else if distance <= 0.4 {
        40.0 - (distance - 0.2) / 0.2 * 10.0
    } else if distance <= 0.6 {
        30.0 - (distance - 0.4) / 0.2 * 10.0
    } else if distance <= 0.8 {
        20.0 - (distance - 0.6) / 0.2 * 10.0
    } else {
        (10.0 - (distance - 0.8) / 0.2 * 10.0).max(0.0)
    };

    (distance, (points.round() as u32).min(CONSISTENCY_MAX))
}

/// Quality heuristics averaged over valid samples (0-20).
///
/// Empty samples and hedged refusals are excluded; no valid samples means
/// zero.
pub(crate) fn quality_score(samples: &[String], hedged_patterns: &[String]) -> u32 {
    let mut total = 0u32;
    let mut valid = 0u32;

    for sample in samples {
        if sample.trim().is_empty() {
            continue;
        }
        let lowered = sample.to_lowercase();
        if hedged_patterns.iter().any(|p| lowered.contains(p.as_str())) {
            continue;
        }

        let len = sample.chars().count();
        let mut pts: u32 = if len >= 200 {
            10
        } else if len >= 100 {
            8
        } else if len >= 50 {
            5
        } else if len >= 20 {
            3
        } else {
            1
        };

        if HAS_DIGIT.is_match(sample) {
            pts += 3;
        }
        if ACTIONABLE.is_match(sample) {
            pts += 2;
        }
        if ORDINAL.is_match(sample) {
            pts += 2;
        }

        total += pts;
        valid += 1;
    }

    if valid == 0 {
        return 0;
    }
    ((f64::from(total) / f64::from(valid)).round() as u32).min(QUALITY_MAX)
}

fn looks_like_json(text: &str) -> bool {
    let open = text.find('{');
    let close = text.rfind('}');
    matches!((open, close), (Some(o), Some(c)) if c > o) && JSON_KEY.is_match(text)
}

fn looks_like_table(text: &str) -> bool {
    TABLE_ROW.is_match(text) && text.matches('|').count() >= 4
}

fn push_unique(messages: &mut Vec<&'static str>, msg: &'static str) {
    if !messages.contains(&msg) {
        messages.push(msg);
    }
}
