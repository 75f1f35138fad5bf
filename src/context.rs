//! Assembles outbound chat requests from raw input, optional video
//! metadata, and an optional playback position.
//!
//! Pure transforms only: the prepared display text is exactly what the
//! controller stores as the user message and what goes out as `message`,
//! so the transcript and the replayed history never disagree.

use crate::models::{ChatRequest, HistoryEntry, VideoContextPayload, VideoInfo};

/// A prepared chat turn: what to display/store, and what to send.
#[derive(Debug, Clone)]
pub struct PreparedTurn {
    /// The raw question as typed, before any prefixing.
    pub input: String,
    /// User-visible text, `[At M:SS] ` prefixed when a position was given.
    pub display_text: String,
    /// Bare `M:SS` label, when a position was given.
    pub position_label: Option<String>,
    pub request: ChatRequest,
}

/// Formats a playback position as `M:SS` — minutes unpadded, seconds
/// zero-padded to two digits (65 → `1:05`, 600 → `10:00`).
pub fn format_position(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Builds the outbound request for one chat turn.
///
/// `history` is the transcript's outbound history as of the moment of
/// submission, i.e. without the seed greeting and without this turn.
pub fn prepare_turn(
    input: &str,
    history: Vec<HistoryEntry>,
    video: Option<&VideoInfo>,
    position_seconds: Option<u64>,
) -> PreparedTurn {
    let position_label = position_seconds.map(format_position);

    let display_text = match &position_label {
        Some(label) => format!("[At {label}] {input}"),
        None => input.to_string(),
    };

    let video_context = video.map(|v| VideoContextPayload {
        id: v.id.clone(),
        title: v.title.clone(),
        description: match &position_label {
            Some(label) => format!("Current time: {label}"),
            None => v.description.clone().unwrap_or_default(),
        },
    });

    let request = ChatRequest {
        message: display_text.clone(),
        history,
        video_context,
        timestamp: position_label.clone(),
    };

    PreparedTurn { input: input.to_string(), display_text, position_label, request }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_label_formatting() {
        assert_eq!(format_position(65), "1:05");
        assert_eq!(format_position(5), "0:05");
        assert_eq!(format_position(600), "10:00");
        assert_eq!(format_position(0), "0:00");
        assert_eq!(format_position(3599), "59:59");
    }

    #[test]
    fn position_prefixes_display_text_and_request_message() {
        let turn = prepare_turn("what is a neuron?", vec![], None, Some(65));
        assert_eq!(turn.display_text, "[At 1:05] what is a neuron?");
        assert_eq!(turn.request.message, turn.display_text);
        assert_eq!(turn.request.timestamp.as_deref(), Some("1:05"));
    }

    #[test]
    fn no_position_means_no_prefix_and_no_timestamp() {
        let turn = prepare_turn("what is a neuron?", vec![], None, None);
        assert_eq!(turn.display_text, "what is a neuron?");
        assert!(turn.position_label.is_none());
        assert!(turn.request.timestamp.is_none());
    }

    #[test]
    fn video_context_carries_current_time_when_position_given() {
        let video = VideoInfo::new("dZh_ps8Icm4", "Neural Networks Explained");
        let turn = prepare_turn("explain this part", vec![], Some(&video), Some(645));

        let context = turn.request.video_context.unwrap();
        assert_eq!(context.id, "dZh_ps8Icm4");
        assert_eq!(context.title, "Neural Networks Explained");
        assert_eq!(context.description, "Current time: 10:45");
    }

    #[test]
    fn video_context_falls_back_to_own_description_without_position() {
        let video = VideoInfo::new("v1", "Intro").with_description("A first look");
        let turn = prepare_turn("hi", vec![], Some(&video), None);
        assert_eq!(turn.request.video_context.unwrap().description, "A first look");

        let bare = VideoInfo::new("v1", "Intro");
        let turn = prepare_turn("hi", vec![], Some(&bare), None);
        assert_eq!(turn.request.video_context.unwrap().description, "");
    }

    #[test]
    fn no_video_means_no_context_payload() {
        let turn = prepare_turn("hi", vec![], None, Some(10));
        assert!(turn.request.video_context.is_none());
    }

    #[test]
    fn history_is_passed_through_untouched() {
        let history = vec![
            HistoryEntry { role: "user".into(), content: "a".into() },
            HistoryEntry { role: "assistant".into(), content: "b".into() },
        ];
        let turn = prepare_turn("c", history.clone(), None, None);
        assert_eq!(turn.request.history, history);
    }
}
