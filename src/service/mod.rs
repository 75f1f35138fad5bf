//! Orchestration: the response pipeline and the per-surface session
//! controller.

pub mod pipeline;
pub mod session;

pub use pipeline::{FailurePolicy, ReplyOrigin, Resolution, ResponsePipeline};
pub use session::{ChatSession, SessionEvent, SubmitOutcome};
