//! Port definitions for speech processing
//!
//! Defines the traits (ports) that speech providers must implement.

use async_trait::async_trait;

use crate::error::SpeechError;

/// Port for speech recognition (input)
///
/// A recognizer runs at most one session at a time. Events for a session
/// arrive on the channel handed out at construction, in the order
/// `Result` → `End` or `Error` → `End`; a new session can only begin after
/// the previous one emitted `End`.
///
/// # Example
///
/// ```ignore
/// use speech::{RecognizerEvent, SpeechRecognizer};
///
/// async fn listen_once(recognizer: &impl SpeechRecognizer) -> Result<(), SpeechError> {
///     recognizer.start().await
/// }
/// ```
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Begin a single-utterance recognition session
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::AlreadyActive` if a session is in flight.
    async fn start(&self) -> Result<(), SpeechError>;

    /// Abort the active session
    ///
    /// Emits `End` without a result. Stopping when no session is active is
    /// a no-op.
    async fn stop(&self) -> Result<(), SpeechError>;

    /// Whether a session is currently active
    fn is_active(&self) -> bool;

    /// BCP-47 locale tag the recognizer listens in
    fn locale(&self) -> &str;
}

/// Port for speech synthesis (output)
///
/// Synthesis is fire-and-forget from the caller's point of view: the core
/// never waits for playback to finish.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Speak the given text aloud
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if the utterance could not be produced.
    async fn speak(&self, text: &str) -> Result<(), SpeechError>;

    /// Check if the synthesizer is available
    async fn is_available(&self) -> bool;

    /// Get the configured voice name
    fn voice(&self) -> &str;
}
