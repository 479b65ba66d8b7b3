//! Prompt scorers and their result types.

pub mod distance;
pub mod empirical;
pub mod judge;
pub mod suggest;
pub mod types;


pub use empirical::{DEFAULT_HEDGED_PATTERNS, EmpiricalScorer};
pub use judge::JudgeScorer;
pub use suggest::SuggestionSynthesizer;
pub use types::{EmpiricalDetails, EmpiricalResult, JudgeResult, ScoreRecord};
