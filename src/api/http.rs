use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::api::{decode_chat_response, decode_conversations, EndpointConfig, TokenProvider, TutorApi};
use crate::errors::{DecodeError, TutorError};
use crate::models::{ChatRequest, ChatResponse, ConversationSummary};

/// HTTP implementation of [`TutorApi`] over `reqwest`.
pub struct HttpApi {
    client: Client,
    config: EndpointConfig,
    tokens: Arc<dyn TokenProvider>,
}

impl HttpApi {
    pub fn new(
        config: EndpointConfig,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self, TutorError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(TutorError::Network)?;
        Ok(Self { client, config, tokens })
    }

    /// Attaches the bearer token when one is available. The scheme is
    /// lowercase `bearer`, matching what the deployed backend expects.
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.tokens.token() {
            Some(token) => request.header(reqwest::header::AUTHORIZATION, format!("bearer {token}")),
            None => request,
        }
    }

    fn map_send_error(&self, error: reqwest::Error) -> TutorError {
        if error.is_timeout() {
            TutorError::Timeout { waited: self.config.timeout }
        } else {
            TutorError::Network(error)
        }
    }

    async fn fetch_json(&self, request: reqwest::RequestBuilder) -> Result<Value, TutorError> {
        let response = request.send().await.map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TutorError::Http { status: status.as_u16() });
        }

        let body = response.text().await.map_err(|e| self.map_send_error(e))?;
        let raw: Value = serde_json::from_str(&body)
            .map_err(|e| TutorError::Decode(DecodeError::Json(e)))?;
        Ok(raw)
    }
}

#[async_trait]
impl TutorApi for HttpApi {
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse, TutorError> {
        let url = self.config.chat_url();
        debug!(%url, history_len = request.history.len(), "sending chat turn");

        let raw = self
            .fetch_json(self.authorize(self.client.post(&url).json(request)))
            .await?;
        Ok(decode_chat_response(&raw)?)
    }

    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, TutorError> {
        let url = self.config.conversations_url();
        debug!(%url, "fetching conversations");

        let raw = self.fetch_json(self.authorize(self.client.get(&url))).await?;
        Ok(decode_conversations(&raw)?)
    }
}
