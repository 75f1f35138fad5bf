//! Remote tutor endpoint access: the transport seam, the bearer-token
//! capability, and the wire decoders.

mod decode;
mod http;

pub use decode::{decode_chat_response, decode_conversations};
pub use http::HttpApi;

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::TutorError;
use crate::models::{ChatRequest, ChatResponse, ConversationSummary};

/// Where the tutor backend lives. Paths are configurable because
/// deployments have exposed the chat endpoint as `/tutor`, `/openai`, or
/// `/api/tutor/chat`.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    pub base_url: String,
    pub chat_path: String,
    pub conversations_path: String,
    /// Upper bound on one remote attempt.
    pub timeout: Duration,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            chat_path: "/api/tutor/chat".to_string(),
            conversations_path: "/api/tutor/conversations".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl EndpointConfig {
    pub fn chat_url(&self) -> String {
        join_url(&self.base_url, &self.chat_path)
    }

    pub fn conversations_url(&self) -> String {
        join_url(&self.base_url, &self.conversations_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Supplies the bearer token attached to outbound requests, when one is
/// available. Abstracted so token storage stays outside the session core
/// and tests can substitute fixed tokens.
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// No authentication: requests go out without an `Authorization` header.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

impl TokenProvider for NoToken {
    fn token(&self) -> Option<String> {
        None
    }
}

/// A fixed token, handed over at construction.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// The remote tutor transport. One implementation talks HTTP; tests
/// substitute scripted mocks.
#[async_trait]
pub trait TutorApi: Send + Sync {
    /// Sends one chat turn. Exactly one request per call; retries are the
    /// caller's policy decision, and the pipeline's policy is none.
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse, TutorError>;

    /// Fetches the conversations listing.
    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, TutorError>;
}
