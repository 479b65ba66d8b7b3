//! Transport seam between the LLM client and the upstream endpoint.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use super::types::ChatRequest;

/// Connection-level failures, raised before any HTTP status is available.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("transport failure: {0}")]
    Connection(String),
}

/// A completed HTTP exchange: status code plus raw body.
#[derive(Debug, Clone)]
pub struct ChatExchange {
    pub status: u16,
    pub body: String,
}

/// One round trip to a chat-completions endpoint.
///
/// Implementations surface the raw status and body; retry and salvage policy
/// belongs to [`super::LlmClient`].
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(
        &self,
        request: &ChatRequest,
        timeout: Duration,
    ) -> Result<ChatExchange, TransportError>;
}

/// Reqwest-backed transport with bearer auth and per-request timeouts.
#[derive(Debug, Clone)]
pub struct HttpChatTransport {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpChatTransport {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn send(
        &self,
        request: &ChatRequest,
        timeout: Duration,
    ) -> Result<ChatExchange, TransportError> {
        let mut builder = self.http.post(&self.endpoint).timeout(timeout).json(request);
        if !self.api_key.is_empty() {
            builder = builder.bearer_auth(&self.api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| classify_reqwest_error(e, timeout))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| classify_reqwest_error(e, timeout))?;

        Ok(ChatExchange { status, body })
    }
}

fn classify_reqwest_error(err: reqwest::Error, timeout: Duration) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(timeout)
    } else {
        TransportError::Connection(err.to_string())
    }
}
