//! End-to-end session protocol tests against scripted transports.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use tutor_chat::{
    ChatRequest, ChatResponse, ChatSession, ConversationSummary, FailurePolicy, ResponsePipeline,
    Sender, SessionEvent, SimulatedTutor, SubmitOutcome, TutorApi, TutorError,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tutor_chat=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

/// Transport that blocks inside `send_chat` until the test releases it,
/// so a request can be held in the pending state deliberately.
struct GatedApi {
    entered: Notify,
    release: Notify,
    calls: AtomicUsize,
}

impl GatedApi {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            entered: Notify::new(),
            release: Notify::new(),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl TutorApi for GatedApi {
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse, TutorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
        Ok(ChatResponse {
            response: format!("answer to: {}", request.message),
            conversation_id: None,
        })
    }

    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, TutorError> {
        Ok(Vec::new())
    }
}

/// Transport that never answers.
struct StalledApi;

#[async_trait]
impl TutorApi for StalledApi {
    async fn send_chat(&self, _request: &ChatRequest) -> Result<ChatResponse, TutorError> {
        tokio::time::sleep(Duration::from_secs(86400)).await;
        unreachable!("the pipeline timeout must fire first")
    }

    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, TutorError> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn rapid_double_submit_sends_exactly_one_request() {
    init_tracing();
    let api = GatedApi::new();
    let (session, _events) = ChatSession::tutor(api.clone());
    let session = Arc::new(session);

    let first = {
        let session = session.clone();
        tokio::spawn(async move { session.submit("first question").await })
    };

    // Wait until the first request is genuinely pending, then submit again.
    api.entered.notified().await;
    assert!(session.is_awaiting().await);
    assert_eq!(session.submit("second question").await, SubmitOutcome::IgnoredBusy);

    api.release.notify_one();
    assert_eq!(first.await.unwrap(), SubmitOutcome::Sent);

    assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    let messages = session.messages().await;
    // Greeting, one user message, one assistant message; the second
    // submit left no trace.
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].text, "first question");
    assert!(!session.is_awaiting().await);
}

#[tokio::test]
async fn teardown_while_pending_discards_the_resolution() {
    init_tracing();
    let api = GatedApi::new();
    let (session, mut events) = ChatSession::tutor(api.clone());
    let session = Arc::new(session);

    let pending = {
        let session = session.clone();
        tokio::spawn(async move { session.submit("will be abandoned").await })
    };

    api.entered.notified().await;
    session.close();

    // Drain the events emitted before teardown: user append + typing on.
    assert!(matches!(events.recv().await.unwrap(), SessionEvent::MessageAppended(_)));
    assert!(matches!(events.recv().await.unwrap(), SessionEvent::Typing(true)));

    // Let the remote call resolve after the surface is gone.
    api.release.notify_one();
    assert_eq!(pending.await.unwrap(), SubmitOutcome::Discarded);

    // No assistant message was applied to the disposed transcript and no
    // further events were emitted.
    let messages = session.messages().await;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].sender, Sender::User);
    assert!(events.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn timeout_resolves_to_idle_with_one_fallback_message() {
    let pipeline = ResponsePipeline::new(Arc::new(StalledApi), FailurePolicy::LocalFallback)
        .with_timeout(Duration::from_secs(10));
    let (session, _events) = ChatSession::new(pipeline, "Hello!", None);

    let outcome = session.submit_at("what is gradient descent?", Some(65)).await;
    assert_eq!(outcome, SubmitOutcome::Sent);

    let messages = session.messages().await;
    assert_eq!(messages.len(), 3);
    let reply = &messages[2];
    assert_eq!(reply.sender, Sender::Assistant);
    assert!(reply.text.contains("at 1:05"));
    assert!(reply.text.contains("'what is gradient descent?'"));
    assert!(!session.is_awaiting().await);

    // Deterministic: the same failure yields the same fallback text.
    session.submit_at("what is gradient descent?", Some(65)).await;
    let messages = session.messages().await;
    assert_eq!(messages[4].text, reply.text);
}

#[tokio::test(start_paused = true)]
async fn tutor_surface_timeout_emits_a_notice_and_one_apology() {
    let pipeline = ResponsePipeline::new(Arc::new(StalledApi), FailurePolicy::NotifyAndApologize)
        .with_timeout(Duration::from_secs(10));
    let (session, mut events) = ChatSession::new(pipeline, "Hello!", None);

    assert_eq!(session.submit("are you there?").await, SubmitOutcome::Sent);

    let messages = session.messages().await;
    assert_eq!(messages.len(), 3);
    assert!(messages[2].text.starts_with("Sorry, I'm having trouble connecting"));

    let mut saw_notice = false;
    while let Ok(event) = events.try_recv() {
        if let SessionEvent::Notice(text) = event {
            saw_notice = true;
            assert!(text.contains("did not answer"));
        }
    }
    assert!(saw_notice);
}

#[tokio::test]
async fn simulated_tutor_drives_a_full_session() {
    init_tracing();
    let (session, _events) = ChatSession::tutor(Arc::new(SimulatedTutor));

    assert_eq!(session.submit("recommend me a course").await, SubmitOutcome::Sent);

    let messages = session.messages().await;
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[2].sender, Sender::Assistant);
    assert!(!messages[2].text.is_empty());

    // Same question, same canned reply.
    session.submit("recommend me a course").await;
    assert_eq!(session.messages().await[4].text, messages[2].text);

    assert_eq!(session.conversations().await.len(), 2);
}

#[tokio::test]
async fn conversations_listing_degrades_without_breaking_the_session() {
    struct BrokenListing;

    #[async_trait]
    impl TutorApi for BrokenListing {
        async fn send_chat(&self, _request: &ChatRequest) -> Result<ChatResponse, TutorError> {
            Ok(ChatResponse { response: "ok".into(), conversation_id: None })
        }

        async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, TutorError> {
            Err(TutorError::Http { status: 500 })
        }
    }

    let (session, _events) = ChatSession::tutor(Arc::new(BrokenListing));
    assert!(session.conversations().await.is_empty());
    // The chat path is unaffected by the broken listing.
    assert_eq!(session.submit("still works?").await, SubmitOutcome::Sent);
}
