//! Conversation turn entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// The human speaking into the microphone
    User,
    /// The assistant's reply
    Assistant,
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "User"),
            Self::Assistant => write!(f, "Assistant"),
        }
    }
}

/// A single turn in the conversation, immutable once appended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Unique turn identifier
    pub id: Uuid,
    /// Who produced the turn
    pub speaker: Speaker,
    /// Transcript or reply text
    pub text: String,
    /// When the turn was created
    pub created_at: DateTime<Utc>,
}

impl Turn {
    /// Create a turn for the given speaker
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            speaker,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    /// Create a user turn
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Speaker::User, text)
    }

    /// Create an assistant turn
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Speaker::Assistant, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_turn_has_correct_speaker() {
        let turn = Turn::user("Hello there");
        assert_eq!(turn.speaker, Speaker::User);
        assert_eq!(turn.text, "Hello there");
    }

    #[test]
    fn assistant_turn_has_correct_speaker() {
        let turn = Turn::assistant("Hi there! How are you?");
        assert_eq!(turn.speaker, Speaker::Assistant);
    }

    #[test]
    fn turns_have_unique_ids() {
        let a = Turn::user("one");
        let b = Turn::user("one");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn speaker_display() {
        assert_eq!(Speaker::User.to_string(), "User");
        assert_eq!(Speaker::Assistant.to_string(), "Assistant");
    }

    #[test]
    fn speaker_serializes_lowercase() {
        let json = serde_json::to_string(&Speaker::Assistant).unwrap();
        assert_eq!(json, r#""assistant""#);
    }
}
