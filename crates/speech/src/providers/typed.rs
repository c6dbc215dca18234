//! Typed recognizer - Interactive stand-in for the platform engine
//!
//! While a session is active, `submit` turns a typed line into the session's
//! final transcript. `fail` injects an engine error instead.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::SpeechRecognizer;
use crate::types::{RecognitionErrorCode, RecognizerEvent, Transcription};

/// Recognizer fed by typed input instead of a microphone
#[derive(Clone)]
pub struct TypedRecognizer {
    inner: Arc<Inner>,
}

struct Inner {
    config: SpeechConfig,
    active: AtomicBool,
    events: mpsc::UnboundedSender<RecognizerEvent>,
}

impl fmt::Debug for TypedRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedRecognizer")
            .field("locale", &self.inner.config.locale)
            .field("active", &self.is_active())
            .finish()
    }
}

impl TypedRecognizer {
    /// Create a typed recognizer and the receiving end of its events
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the config requests
    /// continuous or interim-result recognition.
    pub fn new(
        config: SpeechConfig,
    ) -> Result<(Self, mpsc::UnboundedReceiver<RecognizerEvent>), SpeechError> {
        config.validate_single_utterance()?;
        let (tx, rx) = mpsc::unbounded_channel();
        let recognizer = Self {
            inner: Arc::new(Inner {
                config,
                active: AtomicBool::new(false),
                events: tx,
            }),
        };
        Ok((recognizer, rx))
    }

    /// Deliver a typed utterance as the active session's final transcript
    ///
    /// Blank input ends the session with a `no-speech` error, matching an
    /// engine that heard nothing.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::NotActive` if no session is listening.
    pub fn submit(&self, text: &str) -> Result<(), SpeechError> {
        self.take_active()?;

        let trimmed = text.trim();
        let event = if trimmed.is_empty() {
            RecognizerEvent::Error(RecognitionErrorCode::NoSpeech)
        } else {
            let mut transcription = Transcription::new(trimmed);
            if let Some(language) = self.inner.config.locale.split('-').next() {
                transcription = transcription.with_language(language);
            }
            RecognizerEvent::Result(transcription)
        };

        self.send(event)?;
        self.send(RecognizerEvent::End)
    }

    /// End the active session with an engine error
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::NotActive` if no session is listening.
    pub fn fail(&self, code: RecognitionErrorCode) -> Result<(), SpeechError> {
        self.take_active()?;
        self.send(RecognizerEvent::Error(code))?;
        self.send(RecognizerEvent::End)
    }

    fn take_active(&self) -> Result<(), SpeechError> {
        if self
            .inner
            .active
            .compare_exchange(true, false, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SpeechError::NotActive);
        }
        Ok(())
    }

    fn send(&self, event: RecognizerEvent) -> Result<(), SpeechError> {
        self.inner
            .events
            .send(event)
            .map_err(|_| SpeechError::ChannelClosed)
    }
}

#[async_trait]
impl SpeechRecognizer for TypedRecognizer {
    async fn start(&self) -> Result<(), SpeechError> {
        if self
            .inner
            .active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SpeechError::AlreadyActive);
        }
        Ok(())
    }

    async fn stop(&self) -> Result<(), SpeechError> {
        if self.take_active().is_err() {
            return Ok(());
        }
        self.send(RecognizerEvent::End)
    }

    fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::SeqCst)
    }

    fn locale(&self) -> &str {
        &self.inner.config.locale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn submit_delivers_result_then_end() {
        let (recognizer, mut events) = TypedRecognizer::new(SpeechConfig::default()).unwrap();

        recognizer.start().await.unwrap();
        recognizer.submit("what is your name").unwrap();

        let RecognizerEvent::Result(t) = events.recv().await.unwrap() else {
            unreachable!("Expected a result event")
        };
        assert_eq!(t.text, "what is your name");
        assert_eq!(events.recv().await.unwrap(), RecognizerEvent::End);
        assert!(!recognizer.is_active());
    }

    #[tokio::test]
    async fn submit_without_session_fails() {
        let (recognizer, _events) = TypedRecognizer::new(SpeechConfig::default()).unwrap();

        let result = recognizer.submit("hello");
        assert!(matches!(result, Err(SpeechError::NotActive)));
    }

    #[tokio::test]
    async fn blank_submit_is_no_speech() {
        let (recognizer, mut events) = TypedRecognizer::new(SpeechConfig::default()).unwrap();

        recognizer.start().await.unwrap();
        recognizer.submit("   ").unwrap();

        assert_eq!(
            events.recv().await.unwrap(),
            RecognizerEvent::Error(RecognitionErrorCode::NoSpeech)
        );
        assert_eq!(events.recv().await.unwrap(), RecognizerEvent::End);
    }

    #[tokio::test]
    async fn fail_delivers_error_then_end() {
        let (recognizer, mut events) = TypedRecognizer::new(SpeechConfig::default()).unwrap();

        recognizer.start().await.unwrap();
        recognizer.fail(RecognitionErrorCode::NotAllowed).unwrap();

        assert_eq!(
            events.recv().await.unwrap(),
            RecognizerEvent::Error(RecognitionErrorCode::NotAllowed)
        );
        assert_eq!(events.recv().await.unwrap(), RecognizerEvent::End);
        assert!(!recognizer.is_active());
    }

    #[tokio::test]
    async fn double_start_is_rejected() {
        let (recognizer, _events) = TypedRecognizer::new(SpeechConfig::default()).unwrap();

        recognizer.start().await.unwrap();
        assert!(matches!(
            recognizer.start().await,
            Err(SpeechError::AlreadyActive)
        ));
    }

    #[tokio::test]
    async fn stop_emits_end_only() {
        let (recognizer, mut events) = TypedRecognizer::new(SpeechConfig::default()).unwrap();

        recognizer.start().await.unwrap();
        recognizer.stop().await.unwrap();

        assert_eq!(events.recv().await.unwrap(), RecognizerEvent::End);
        assert!(!recognizer.is_active());

        // Stopping again is a no-op.
        recognizer.stop().await.unwrap();
        let extra = events.try_recv();
        assert!(extra.is_err());
    }

    #[tokio::test]
    async fn submit_trims_surrounding_whitespace() {
        let (recognizer, mut events) = TypedRecognizer::new(SpeechConfig::default()).unwrap();

        recognizer.start().await.unwrap();
        recognizer.submit("  hello there  ").unwrap();

        let RecognizerEvent::Result(t) = events.recv().await.unwrap() else {
            unreachable!("Expected a result event")
        };
        assert_eq!(t.text, "hello there");
    }
}
