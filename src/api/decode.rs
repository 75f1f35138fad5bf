//! Pure decoders for the tutor endpoint's loosely specified bodies.
//!
//! Deployed backends have answered with `response` or `text` for the reply
//! field, and with either `{"conversations": [...]}` or a bare array for
//! the listing. Both shapes of each are accepted here, explicitly, so the
//! tolerance is a tested contract rather than an accident.

use serde_json::Value;

use crate::errors::DecodeError;
use crate::models::{ChatResponse, ConversationSummary};

/// Decodes a chat reply body.
///
/// The reply text is taken from `response`, falling back to `text`;
/// `conversationId` is optional. An empty string is a valid decode — the
/// pipeline decides what to show for it.
pub fn decode_chat_response(raw: &Value) -> Result<ChatResponse, DecodeError> {
    let response = raw
        .get("response")
        .and_then(Value::as_str)
        .or_else(|| raw.get("text").and_then(Value::as_str))
        .ok_or(DecodeError::MissingReplyField)?;

    let conversation_id = raw
        .get("conversationId")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(ChatResponse { response: response.to_string(), conversation_id })
}

/// Decodes a conversations listing, wrapped or bare.
pub fn decode_conversations(raw: &Value) -> Result<Vec<ConversationSummary>, DecodeError> {
    let items = match raw {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => map
            .get("conversations")
            .and_then(Value::as_array)
            .ok_or(DecodeError::UnexpectedShape)?
            .as_slice(),
        _ => return Err(DecodeError::UnexpectedShape),
    };

    items
        .iter()
        .map(|item| serde_json::from_value(item.clone()).map_err(DecodeError::Json))
        .collect()
}
