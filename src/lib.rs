//! Conversational session core for the AI tutor surfaces of the learning
//! platform: an append-only transcript seeded with a greeting, a context
//! builder that injects video playback positions, a remote-or-fallback
//! response pipeline, and a session controller enforcing the
//! one-outstanding-request protocol.
//!
//! Two surface presets exist, differing only in greeting and failure
//! policy: [`ChatSession::video_chat`] degrades silently to deterministic
//! local text when the backend is unreachable, while [`ChatSession::tutor`]
//! appends a single apology and emits a [`SessionEvent::Notice`] for the
//! surface to toast.
//!
//! ```no_run
//! use std::sync::Arc;
//! use tutor_chat::{ChatSession, EndpointConfig, HttpApi, NoToken, SessionEvent};
//!
//! # async fn run() -> Result<(), tutor_chat::TutorError> {
//! let api = Arc::new(HttpApi::new(EndpointConfig::default(), Arc::new(NoToken))?);
//! let (session, mut events) = ChatSession::tutor(api);
//!
//! session.submit("Can you build me a learning roadmap?").await;
//! while let Ok(event) = events.try_recv() {
//!     if let SessionEvent::MessageAppended(message) = event {
//!         println!("{}: {}", message.sender, message.text);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod api;
pub mod context;
pub mod errors;
pub mod fallback;
pub mod models;
pub mod service;
pub mod transcript;

pub use agent::SimulatedTutor;
pub use api::{
    decode_chat_response, decode_conversations, EndpointConfig, HttpApi, NoToken, StaticToken,
    TokenProvider, TutorApi,
};
pub use context::{format_position, prepare_turn, PreparedTurn};
pub use errors::{DecodeError, TutorError};
pub use models::{
    ChatRequest, ChatResponse, ConversationSummary, HistoryEntry, Message, Sender,
    VideoContextPayload, VideoInfo,
};
pub use service::{
    ChatSession, FailurePolicy, ReplyOrigin, Resolution, ResponsePipeline, SessionEvent,
    SubmitOutcome,
};
pub use transcript::Transcript;
