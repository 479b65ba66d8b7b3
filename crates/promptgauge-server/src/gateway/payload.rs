use serde::Deserialize;

/// Body of `POST /api/v1/score`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub prompt: String,
}
