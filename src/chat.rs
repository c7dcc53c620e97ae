/// Q&A transcript state: ordered chat messages and the one-question-at-a-time
/// guard for the send control
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who produced a chat message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Ai,
    System,
}

impl MessageKind {
    /// Display name shown next to the message bubble
    pub fn sender(&self) -> &'static str {
        match self {
            MessageKind::User => "You",
            MessageKind::Ai => "AI Assistant",
            MessageKind::System => "System",
        }
    }
}

/// A single entry of the chat transcript
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub kind: MessageKind,
    pub content: String,
    /// Milliseconds since epoch, supplied by the caller
    pub timestamp: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl ChatMessage {
    pub fn new(kind: MessageKind, content: String, timestamp: f64) -> ChatMessage {
        ChatMessage {
            id: Uuid::new_v4().to_string(),
            kind,
            content,
            timestamp,
            confidence: None,
        }
    }
}

/// Confidence tier of a backend answer, rendered as a badge
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfidenceTier {
    High,
    General,
}

impl ConfidenceTier {
    /// Tier for a reported confidence score. Zero or absent scores carry no
    /// badge at all.
    pub fn from_score(score: Option<f64>) -> Option<ConfidenceTier> {
        match score {
            Some(c) if c > 0.7 => Some(ConfidenceTier::High),
            Some(c) if c > 0.0 => Some(ConfidenceTier::General),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "high confidence",
            ConfidenceTier::General => "general answer",
        }
    }
}

/// In-memory chat transcript with at most one outstanding question
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    pending: bool,
}

impl Transcript {
    pub fn new() -> Transcript {
        Transcript {
            messages: Vec::new(),
            pending: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// True while a question is in flight; the send control must stay
    /// disabled until the reply is recorded
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Append a user question and mark the transcript pending. Returns false
    /// without appending if a previous question is still unanswered.
    pub fn begin_question(&mut self, question: String, timestamp: f64) -> bool {
        if self.pending {
            return false;
        }
        self.messages
            .push(ChatMessage::new(MessageKind::User, question, timestamp));
        self.pending = true;
        true
    }

    /// Append the backend answer with its confidence score and clear the
    /// pending flag
    pub fn record_answer(&mut self, answer: String, confidence: Option<f64>, timestamp: f64) {
        let mut message = ChatMessage::new(MessageKind::Ai, answer, timestamp);
        message.confidence = confidence;
        self.messages.push(message);
        self.pending = false;
    }

    /// Append a system-level notice (readiness info, failures) and clear the
    /// pending flag
    pub fn record_system(&mut self, notice: String, timestamp: f64) {
        self.messages
            .push(ChatMessage::new(MessageKind::System, notice, timestamp));
        self.pending = false;
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.pending = false;
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_tiers() {
        assert_eq!(ConfidenceTier::from_score(Some(0.9)), Some(ConfidenceTier::High));
        assert_eq!(ConfidenceTier::from_score(Some(0.71)), Some(ConfidenceTier::High));
        assert_eq!(ConfidenceTier::from_score(Some(0.7)), Some(ConfidenceTier::General));
        assert_eq!(ConfidenceTier::from_score(Some(0.3)), Some(ConfidenceTier::General));
        assert_eq!(ConfidenceTier::from_score(Some(0.0)), None);
        assert_eq!(ConfidenceTier::from_score(None), None);
    }

    #[test]
    fn test_tier_labels() {
        assert_eq!(ConfidenceTier::High.label(), "high confidence");
        assert_eq!(ConfidenceTier::General.label(), "general answer");
    }

    #[test]
    fn test_begin_question_appends_and_marks_pending() {
        let mut transcript = Transcript::new();

        assert!(transcript.begin_question("What is this about?".to_string(), 1.0));

        assert!(transcript.is_pending());
        assert_eq!(transcript.messages().len(), 1);
        assert_eq!(transcript.messages()[0].kind, MessageKind::User);
        assert_eq!(transcript.messages()[0].content, "What is this about?");
    }

    #[test]
    fn test_second_question_refused_while_pending() {
        let mut transcript = Transcript::new();
        transcript.begin_question("first".to_string(), 1.0);

        assert!(!transcript.begin_question("second".to_string(), 2.0));
        assert_eq!(transcript.messages().len(), 1);
    }

    #[test]
    fn test_answer_settles_pending_and_allows_next_question() {
        let mut transcript = Transcript::new();
        transcript.begin_question("first".to_string(), 1.0);
        transcript.record_answer("an answer".to_string(), Some(0.8), 2.0);

        assert!(!transcript.is_pending());
        assert_eq!(transcript.messages().len(), 2);
        assert_eq!(transcript.messages()[1].kind, MessageKind::Ai);
        assert_eq!(transcript.messages()[1].confidence, Some(0.8));

        assert!(transcript.begin_question("second".to_string(), 3.0));
    }

    #[test]
    fn test_failure_notice_settles_pending() {
        let mut transcript = Transcript::new();
        transcript.begin_question("first".to_string(), 1.0);
        transcript.record_system("request failed".to_string(), 2.0);

        assert!(!transcript.is_pending());
        assert_eq!(transcript.messages()[1].kind, MessageKind::System);
        assert!(transcript.begin_question("second".to_string(), 3.0));
    }

    #[test]
    fn test_messages_keep_document_order() {
        let mut transcript = Transcript::new();
        transcript.record_system("ready".to_string(), 1.0);
        transcript.begin_question("q".to_string(), 2.0);
        transcript.record_answer("a".to_string(), None, 3.0);

        let kinds: Vec<MessageKind> = transcript.messages().iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![MessageKind::System, MessageKind::User, MessageKind::Ai]
        );
    }

    #[test]
    fn test_clear_resets_transcript() {
        let mut transcript = Transcript::new();
        transcript.begin_question("q".to_string(), 1.0);
        transcript.clear();

        assert!(transcript.messages().is_empty());
        assert!(!transcript.is_pending());
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = ChatMessage::new(MessageKind::User, "q".to_string(), 1.0);
        let b = ChatMessage::new(MessageKind::User, "q".to_string(), 1.0);
        assert_ne!(a.id, b.id);
    }
}
