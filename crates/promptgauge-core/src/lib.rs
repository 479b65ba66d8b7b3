//! Promptgauge core library (used by the server and integration tests).
//!
//! # Public API Surface
//!
//! The exports are organized by module:
//!
//! ## Configuration
//! - [`Config`], [`ConfigError`] - Environment-backed settings
//!
//! ## Upstream Access
//! - [`LlmClient`] - The three chat-completion call shapes (judge, complete,
//!   suggest) with their retry and salvage policy
//! - [`ChatTransport`], [`HttpChatTransport`] - The transport seam
//!
//! ## Scoring
//! - [`JudgeScorer`], [`EmpiricalScorer`], [`SuggestionSynthesizer`]
//! - [`JudgeResult`], [`EmpiricalResult`], [`ScoreRecord`] - Result types
//!
//! ## Coordination
//! - [`ScoringPipeline`], [`ScoreError`] - The scoring entry point
//! - [`ScoreCache`], [`InMemoryScoreCache`] - Record memoization
//! - [`FlightGroup`] - Single-flight deduplication
//!
//! ## Utilities
//! - Hashing functions for prompt normalization and cache keys
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod config;
pub mod hashing;
pub mod llm;
pub mod pipeline;
pub mod scoring;

pub use cache::{InMemoryScoreCache, ScoreCache};
pub use config::{Config, ConfigError, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use hashing::{cache_key, fingerprint_prompt, normalize_prompt};
pub use llm::{
    ChatExchange, ChatMessage, ChatRequest, ChatTransport, HttpChatTransport, JudgeReply,
    LlmClient, ResponseFormat, TransportError,
};
#[cfg(any(test, feature = "mock"))]
pub use llm::MockChatTransport;
pub use pipeline::{FlightGroup, MAX_PROMPT_BYTES, ScoreError, ScoringPipeline};
pub use scoring::{
    DEFAULT_HEDGED_PATTERNS, EmpiricalDetails, EmpiricalResult, EmpiricalScorer, JudgeResult,
    JudgeScorer, ScoreRecord, SuggestionSynthesizer,
};
