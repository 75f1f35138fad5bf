use crate::models::{HistoryEntry, Message};

/// Append-only message log for one chat surface.
///
/// Always seeded with a single assistant greeting so the surface has
/// something to show before any input. The greeting is display-only: it is
/// excluded from the history replayed to the remote endpoint.
#[derive(Debug)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        Self { messages: vec![Message::assistant(greeting)] }
    }

    /// Appends to the end. Messages are never reordered or removed.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Snapshot of the current log, in creation order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The most recent message, used by surfaces to scroll-to-latest.
    pub fn latest(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// History to replay to the remote endpoint: everything except the
    /// seed greeting, mapped to wire roles, order preserved.
    pub fn outbound_history(&self) -> Vec<HistoryEntry> {
        self.messages
            .iter()
            .skip(1)
            .map(|m| HistoryEntry {
                role: m.sender.as_role().to_string(),
                content: m.text.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sender;

    #[test]
    fn starts_with_the_seed_greeting() {
        let transcript = Transcript::with_greeting("Hello!");
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.messages()[0].sender, Sender::Assistant);
        assert_eq!(transcript.messages()[0].text, "Hello!");
        assert!(transcript.outbound_history().is_empty());
    }

    #[test]
    fn append_preserves_order() {
        let mut transcript = Transcript::with_greeting("Hello!");
        transcript.append(Message::user("first"));
        transcript.append(Message::assistant("second"));
        transcript.append(Message::user("third"));

        let texts: Vec<&str> = transcript.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["Hello!", "first", "second", "third"]);
    }

    #[test]
    fn outbound_history_excludes_seed_and_maps_roles() {
        let mut transcript = Transcript::with_greeting("Hello!");
        transcript.append(Message::user("what is backprop?"));
        transcript.append(Message::assistant("it propagates gradients"));

        let history = transcript.outbound_history();
        assert_eq!(history.len(), transcript.len() - 1);
        assert_eq!(history[0].role, "user");
        assert_eq!(history[0].content, "what is backprop?");
        assert_eq!(history[1].role, "assistant");
        assert_eq!(history[1].content, "it propagates gradients");
    }

    #[test]
    fn latest_tracks_the_tail() {
        let mut transcript = Transcript::with_greeting("Hello!");
        assert_eq!(transcript.latest().unwrap().text, "Hello!");
        transcript.append(Message::user("ping"));
        assert_eq!(transcript.latest().unwrap().text, "ping");
    }
}
