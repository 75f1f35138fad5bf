use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::Mutex;
use tracing::debug;

use crate::api::TutorApi;
use crate::context::prepare_turn;
use crate::fallback::{TUTOR_GREETING, VIDEO_GREETING};
use crate::models::{ConversationSummary, Message, VideoInfo};
use crate::service::pipeline::{FailurePolicy, ResponsePipeline};
use crate::transcript::Transcript;

/// State changes a chat surface reacts to. The Rust rendition of the
/// frontend's signal updates: appended messages drive scroll-to-latest,
/// typing toggles the indicator and the submit affordance, notices become
/// toasts.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    MessageAppended(Message),
    Typing(bool),
    Notice(String),
}

/// What became of one submit call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A full user-then-assistant cycle ran.
    Sent,
    /// Empty or whitespace-only input; nothing happened.
    IgnoredEmpty,
    /// A request was already pending; nothing happened.
    IgnoredBusy,
    /// The session was closed before the resolution could be applied; the
    /// transcript was left untouched.
    Discarded,
}

struct SessionState {
    transcript: Transcript,
    awaiting: bool,
}

/// One chat surface's conversation controller.
///
/// Owns the transcript and enforces the session protocol: non-empty input
/// only, at most one outstanding request, strictly ordered appends, and
/// no transcript mutation after [`close`](Self::close).
pub struct ChatSession {
    state: Mutex<SessionState>,
    pipeline: ResponsePipeline,
    video: Option<VideoInfo>,
    closed: AtomicBool,
    events: UnboundedSender<SessionEvent>,
}

impl ChatSession {
    /// Core constructor; the surface presets below are the usual entry
    /// points.
    pub fn new(
        pipeline: ResponsePipeline,
        greeting: impl Into<String>,
        video: Option<VideoInfo>,
    ) -> (Self, UnboundedReceiver<SessionEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let session = Self {
            state: Mutex::new(SessionState {
                transcript: Transcript::with_greeting(greeting),
                awaiting: false,
            }),
            pipeline,
            video,
            closed: AtomicBool::new(false),
            events,
        };
        (session, receiver)
    }

    /// The chat widget embedded next to a video player: greeted as the
    /// learning assistant, failures degrade silently to local fallback text.
    pub fn video_chat(
        api: Arc<dyn TutorApi>,
        video: Option<VideoInfo>,
    ) -> (Self, UnboundedReceiver<SessionEvent>) {
        let pipeline = ResponsePipeline::new(api, FailurePolicy::LocalFallback);
        Self::new(pipeline, VIDEO_GREETING, video)
    }

    /// The standalone tutor page: greeted as the AI Tutor, failures
    /// surface a notice and a single apology message.
    pub fn tutor(api: Arc<dyn TutorApi>) -> (Self, UnboundedReceiver<SessionEvent>) {
        let pipeline = ResponsePipeline::new(api, FailurePolicy::NotifyAndApologize);
        Self::new(pipeline, TUTOR_GREETING, None)
    }

    /// Submits one chat turn without a playback position.
    pub async fn submit(&self, input: &str) -> SubmitOutcome {
        self.submit_at(input, None).await
    }

    /// Submits one chat turn, optionally anchored at a playback position.
    ///
    /// Accepted input appends the (possibly `[At M:SS]`-prefixed) user
    /// message, resolves the pipeline, and appends exactly one assistant
    /// message. Guards are silent: bad input and busy sessions are no-ops.
    pub async fn submit_at(&self, input: &str, position_seconds: Option<u64>) -> SubmitOutcome {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return SubmitOutcome::IgnoredEmpty;
        }
        if self.closed.load(Ordering::SeqCst) {
            return SubmitOutcome::Discarded;
        }

        // Guard and optimistic user append under one lock so two rapid
        // submits cannot both slip past the awaiting check.
        let turn = {
            let mut state = self.state.lock().await;
            if state.awaiting {
                debug!("submit ignored, a request is already pending");
                return SubmitOutcome::IgnoredBusy;
            }

            let turn = prepare_turn(
                trimmed,
                state.transcript.outbound_history(),
                self.video.as_ref(),
                position_seconds,
            );
            let user_message = Message::user(turn.display_text.clone());
            state.transcript.append(user_message.clone());
            state.awaiting = true;
            self.emit(SessionEvent::MessageAppended(user_message));
            self.emit(SessionEvent::Typing(true));
            turn
        };

        // The only suspension point: no lock held across the remote call.
        let resolution = self.pipeline.resolve(&turn).await;

        let mut state = self.state.lock().await;
        if self.closed.load(Ordering::SeqCst) {
            // The surface was torn down while we waited; the transcript is
            // disposed and must not observe this resolution.
            return SubmitOutcome::Discarded;
        }

        let assistant = Message::assistant(resolution.text);
        state.transcript.append(assistant.clone());
        state.awaiting = false;
        self.emit(SessionEvent::MessageAppended(assistant));
        self.emit(SessionEvent::Typing(false));
        if let Some(notice) = resolution.notice {
            self.emit(SessionEvent::Notice(notice));
        }
        SubmitOutcome::Sent
    }

    /// Marks the session torn down. In-flight resolutions are discarded
    /// rather than applied; there is no in-flight network abort.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Whether a request is pending; the surface disables its submit
    /// affordance while this holds.
    pub async fn is_awaiting(&self) -> bool {
        self.state.lock().await.awaiting
    }

    /// Snapshot of the transcript in creation order.
    pub async fn messages(&self) -> Vec<Message> {
        self.state.lock().await.transcript.messages().to_vec()
    }

    /// The remote conversations listing, degraded to empty on failure.
    pub async fn conversations(&self) -> Vec<ConversationSummary> {
        self.pipeline.conversations().await
    }

    fn emit(&self, event: SessionEvent) {
        // A surface that dropped its receiver simply stops observing.
        let _ = self.events.send(event);
    }
}
