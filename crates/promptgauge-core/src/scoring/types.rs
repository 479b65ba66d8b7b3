use serde::{Deserialize, Serialize};

/// Verdict from the LLM judge, clamped to `0..=100`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeResult {
    pub score: u8,
    pub reasons: Vec<String>,
    /// The judge's literal JSON content, kept for debugging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

/// Verdict from the empirical sample runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmpiricalResult {
    pub score: u8,
    pub reasons: Vec<String>,
    pub details: EmpiricalDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmpiricalDetails {
    /// Normalized edit distance between the first two samples, `0.0..=1.0`.
    pub variance: f64,
}

/// Final scoring record returned to callers and stored in the cache.
///
/// Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub llm: JudgeResult,
    pub empirical: EmpiricalResult,
    pub average: u8,
    pub suggested_prompt: String,
}
