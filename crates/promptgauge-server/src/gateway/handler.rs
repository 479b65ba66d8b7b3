use axum::{Json, extract::State};
use tracing::instrument;

use promptgauge::{ChatTransport, ScoreCache, ScoreRecord};

use crate::gateway::error::GatewayError;
use crate::gateway::payload::ScoreRequest;
use crate::gateway::state::HandlerState;

/// Scores a prompt and returns the full record.
///
/// Validation failures map to 422; upstream faults arrive already degraded
/// inside the record, so this handler has no 5xx path of its own.
#[instrument(skip(state, request), fields(prompt_len = request.prompt.len()))]
pub async fn score_handler<T, C>(
    State(state): State<HandlerState<T, C>>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreRecord>, GatewayError>
where
    T: ChatTransport + 'static,
    C: ScoreCache + 'static,
{
    let record = state.pipeline.score(&request.prompt).await?;
    Ok(Json(record))
}
