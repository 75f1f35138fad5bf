use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by the remote tutor transport.
///
/// These never reach the chat transcript directly: the response pipeline
/// catches them and resolves to fallback or apology text depending on the
/// surface's failure policy. They exist so the transport and decode layers
/// stay honestly typed and independently testable.
#[derive(Debug, Error)]
pub enum TutorError {
    #[error("network error reaching the tutor endpoint")]
    Network(#[source] reqwest::Error),

    #[error("tutor endpoint did not answer within {waited:?}")]
    Timeout { waited: Duration },

    #[error("tutor endpoint returned HTTP {status}")]
    Http { status: u16 },

    #[error("could not decode tutor response")]
    Decode(#[from] DecodeError),
}

impl TutorError {
    /// Connection-level failures, including the pipeline timeout.
    pub fn is_network(&self) -> bool {
        matches!(self, TutorError::Network(_) | TutorError::Timeout { .. })
    }

    /// Protocol-level failures: bad status or a body we cannot make sense of.
    pub fn is_protocol(&self) -> bool {
        matches!(self, TutorError::Http { .. } | TutorError::Decode(_))
    }
}

/// Failure modes of the pure response decoders.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("response body has neither a 'response' nor a 'text' string field")]
    MissingReplyField,

    #[error("conversations payload is neither an object with 'conversations' nor an array")]
    UnexpectedShape,

    #[error("body is not valid JSON")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_predicates() {
        let timeout = TutorError::Timeout { waited: Duration::from_secs(10) };
        assert!(timeout.is_network());
        assert!(!timeout.is_protocol());

        let http = TutorError::Http { status: 502 };
        assert!(http.is_protocol());
        assert!(!http.is_network());

        let decode = TutorError::Decode(DecodeError::MissingReplyField);
        assert!(decode.is_protocol());
    }
}
