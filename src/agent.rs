use async_trait::async_trait;
use chrono::TimeZone;
use chrono::Utc;

use crate::api::TutorApi;
use crate::errors::TutorError;
use crate::fallback;
use crate::models::{ChatRequest, ChatResponse, ConversationSummary};

/// In-process tutor backed by the keyword responder: the transport used
/// when no remote backend is deployed (and in demos/tests). Every call
/// succeeds and the same question always gets the same reply.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedTutor;

#[async_trait]
impl TutorApi for SimulatedTutor {
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse, TutorError> {
        Ok(ChatResponse {
            response: fallback::tutor_reply(&request.message).to_string(),
            conversation_id: Some("conv_local".to_string()),
        })
    }

    /// A fixed placeholder listing, so surfaces that render a sidebar have
    /// something deterministic to show.
    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, TutorError> {
        let placeholder = |id: &str, title: &str, y, mo, d, h, mi, s| ConversationSummary {
            id: id.to_string(),
            title: title.to_string(),
            updated_at: Utc
                .with_ymd_and_hms(y, mo, d, h, mi, s)
                .single()
                .unwrap_or_default(),
        };
        Ok(vec![
            placeholder("conv_12345", "Neural Networks Discussion", 2023, 7, 15, 14, 23, 10),
            placeholder("conv_67890", "Data Science Roadmap", 2023, 7, 12, 9, 45, 22),
        ])
    }
}
