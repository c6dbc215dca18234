//! Speech ports - Interfaces for the recognition and synthesis adapters

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Events from one recognition session, as the session core sees them
///
/// Within a session the order is `Result` → `End` or `Error` → `End`; a new
/// session cannot start before the previous one signalled `End`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// Final transcript of the utterance
    Result {
        /// The transcribed text
        transcript: String,
    },
    /// The session failed
    Error {
        /// Engine error code (e.g. "not-allowed", "no-speech")
        code: String,
    },
    /// The session ended
    End,
}

/// Port for the speech-recognition adapter
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SpeechInputPort: Send + Sync {
    /// Begin a single-utterance recognition session
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Speech` if the session could not start
    /// (already active, engine unavailable).
    async fn start_listening(&self) -> Result<(), ApplicationError>;

    /// Abort the active session; `End` is still delivered
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Speech` if the adapter failed to stop.
    async fn stop_listening(&self) -> Result<(), ApplicationError>;

    /// Whether a recognition session is currently active
    fn is_listening(&self) -> bool;
}

/// Port for the speech-synthesis adapter
///
/// Synthesis is fire-and-forget: the session never awaits playback and a
/// failure must not block the next turn.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SpeechOutputPort: Send + Sync {
    /// Speak the given text aloud
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Speech` if the utterance failed.
    async fn speak(&self, text: &str) -> Result<(), ApplicationError>;

    /// Check if the synthesizer is available
    async fn is_available(&self) -> bool;
}
