//! Typed access to an OpenAI-compatible chat-completions endpoint.
//!
//! The endpoint is consumed through three fixed call shapes (judge, raw
//! completion, suggestion), each with its own timeout and retry policy. All
//! shapes degrade on failure instead of raising; the scoring pipeline never
//! sees a transport error.

pub mod client;
pub mod json;
pub mod prompts;
pub mod transport;
pub mod types;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use client::{JudgeReply, LlmClient};
pub use transport::{ChatExchange, ChatTransport, HttpChatTransport, TransportError};
pub use types::{ChatMessage, ChatRequest, ResponseFormat};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockChatTransport;
