use thiserror::Error;

/// Validation errors from the scoring entry point.
///
/// These are the only errors the pipeline raises; every upstream fault
/// degrades into the returned record instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("prompt is required")]
    EmptyPrompt,

    #[error("prompt exceeds the maximum length of {limit} bytes")]
    PromptTooLong { limit: usize },
}
