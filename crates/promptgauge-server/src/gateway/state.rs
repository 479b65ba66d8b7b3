use std::sync::Arc;

use promptgauge::{ChatTransport, ScoreCache, ScoringPipeline};

/// Shared state for the gateway handlers.
pub struct HandlerState<T: ChatTransport + 'static, C: ScoreCache + 'static> {
    pub pipeline: Arc<ScoringPipeline<T, C>>,
}

impl<T: ChatTransport + 'static, C: ScoreCache + 'static> HandlerState<T, C> {
    pub fn new(pipeline: Arc<ScoringPipeline<T, C>>) -> Self {
        Self { pipeline }
    }
}

impl<T: ChatTransport + 'static, C: ScoreCache + 'static> Clone for HandlerState<T, C> {
    fn clone(&self) -> Self {
        Self {
            pipeline: self.pipeline.clone(),
        }
    }
}
