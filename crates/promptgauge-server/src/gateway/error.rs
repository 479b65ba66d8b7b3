use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use promptgauge::ScoreError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("prompt is required")]
    EmptyPrompt,

    #[error("prompt exceeds the maximum length of {limit} bytes")]
    PromptTooLong { limit: usize },
}

impl From<ScoreError> for GatewayError {
    fn from(err: ScoreError) -> Self {
        match err {
            ScoreError::EmptyPrompt => GatewayError::EmptyPrompt,
            ScoreError::PromptTooLong { limit } => GatewayError::PromptTooLong { limit },
        }
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::EmptyPrompt | GatewayError::PromptTooLong { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}
