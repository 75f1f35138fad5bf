use std::sync::Arc;
use std::time::Duration;

use tracing::{error, warn};

use crate::api::TutorApi;
use crate::context::PreparedTurn;
use crate::errors::TutorError;
use crate::fallback;
use crate::models::ConversationSummary;

/// How a surface reacts when the remote attempt fails.
///
/// Both are valid per-surface choices; a surface picks one and applies it
/// consistently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Video chat: swallow the failure and answer with deterministic
    /// locally generated text. The conversation never shows a failure.
    LocalFallback,
    /// Tutor page: append one generic apology and carry the error as a
    /// notice for the surface to toast.
    NotifyAndApologize,
}

/// Where a resolved reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOrigin {
    Remote,
    Fallback,
}

/// The always-present outcome of resolving one chat turn.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub text: String,
    pub origin: ReplyOrigin,
    /// Set only under [`FailurePolicy::NotifyAndApologize`]: the error the
    /// surface should show, out of band of the transcript.
    pub notice: Option<String>,
    pub conversation_id: Option<String>,
}

/// Resolves prepared turns against the remote endpoint, with a bounded
/// attempt and an always-succeeding local branch.
///
/// One outbound call per invocation, never more: retrying is an explicit
/// non-policy here, not an oversight.
pub struct ResponsePipeline {
    api: Arc<dyn TutorApi>,
    policy: FailurePolicy,
    timeout: Duration,
}

impl ResponsePipeline {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(api: Arc<dyn TutorApi>, policy: FailurePolicy) -> Self {
        Self { api, policy, timeout: Self::DEFAULT_TIMEOUT }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Resolves one turn. Cannot fail: every error path lands in the
    /// policy's local branch.
    pub async fn resolve(&self, turn: &PreparedTurn) -> Resolution {
        let attempt = tokio::time::timeout(self.timeout, self.api.send_chat(&turn.request)).await;
        let outcome = match attempt {
            Ok(result) => result,
            Err(_) => Err(TutorError::Timeout { waited: self.timeout }),
        };

        match outcome {
            Ok(reply) => {
                if reply.response.trim().is_empty() {
                    warn!("tutor endpoint answered with an empty reply");
                    return Resolution {
                        text: fallback::COULD_NOT_PROCESS.to_string(),
                        origin: ReplyOrigin::Remote,
                        notice: None,
                        conversation_id: reply.conversation_id,
                    };
                }
                Resolution {
                    text: reply.response,
                    origin: ReplyOrigin::Remote,
                    notice: None,
                    conversation_id: reply.conversation_id,
                }
            }
            Err(err) => {
                error!(error = %err, "tutor request failed, applying {:?}", self.policy);
                match self.policy {
                    FailurePolicy::LocalFallback => Resolution {
                        text: fallback::video_reply(&turn.input, turn.position_label.as_deref()),
                        origin: ReplyOrigin::Fallback,
                        notice: None,
                        conversation_id: None,
                    },
                    FailurePolicy::NotifyAndApologize => Resolution {
                        text: fallback::CONNECTION_APOLOGY.to_string(),
                        origin: ReplyOrigin::Fallback,
                        notice: Some(err.to_string()),
                        conversation_id: None,
                    },
                }
            }
        }
    }

    /// Fetches the conversations listing, degrading to an empty list on
    /// any failure so the surface never crashes over it.
    pub async fn conversations(&self) -> Vec<ConversationSummary> {
        match self.api.list_conversations().await {
            Ok(list) => list,
            Err(err) => {
                warn!(error = %err, "conversations fetch failed, showing an empty list");
                Vec::new()
            }
        }
    }
}
