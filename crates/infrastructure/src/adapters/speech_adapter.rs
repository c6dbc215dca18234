//! Speech adapter - Implements the application's speech ports using the
//! speech crate's providers

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{RecognitionEvent, SpeechInputPort, SpeechOutputPort};
use async_trait::async_trait;
use speech::{RecognizerEvent, SpeechError, SpeechRecognizer, SpeechSynthesizer};
use tokio::sync::mpsc;
use tracing::debug;

/// Adapter exposing a `SpeechRecognizer` as the application's input port
pub struct RecognizerAdapter {
    recognizer: Arc<dyn SpeechRecognizer>,
}

impl std::fmt::Debug for RecognizerAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecognizerAdapter")
            .field("locale", &self.recognizer.locale())
            .finish()
    }
}

impl RecognizerAdapter {
    /// Wrap a recognizer provider
    pub fn new(recognizer: Arc<dyn SpeechRecognizer>) -> Self {
        Self { recognizer }
    }
}

#[async_trait]
impl SpeechInputPort for RecognizerAdapter {
    async fn start_listening(&self) -> Result<(), ApplicationError> {
        self.recognizer.start().await.map_err(to_app_error)
    }

    async fn stop_listening(&self) -> Result<(), ApplicationError> {
        self.recognizer.stop().await.map_err(to_app_error)
    }

    fn is_listening(&self) -> bool {
        self.recognizer.is_active()
    }
}

/// Adapter exposing a `SpeechSynthesizer` as the application's output port
pub struct SynthesizerAdapter {
    synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl std::fmt::Debug for SynthesizerAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynthesizerAdapter")
            .field("voice", &self.synthesizer.voice())
            .finish()
    }
}

impl SynthesizerAdapter {
    /// Wrap a synthesizer provider
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self { synthesizer }
    }
}

#[async_trait]
impl SpeechOutputPort for SynthesizerAdapter {
    async fn speak(&self, text: &str) -> Result<(), ApplicationError> {
        self.synthesizer.speak(text).await.map_err(to_app_error)
    }

    async fn is_available(&self) -> bool {
        self.synthesizer.is_available().await
    }
}

/// Convert a provider event stream into the application's event vocabulary
///
/// Spawns a forwarding task; the returned receiver closes when the provider
/// channel does.
pub fn bridge_recognizer_events(
    mut provider_events: mpsc::UnboundedReceiver<RecognizerEvent>,
) -> mpsc::UnboundedReceiver<RecognitionEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        while let Some(event) = provider_events.recv().await {
            let mapped = match event {
                RecognizerEvent::Result(transcription) => RecognitionEvent::Result {
                    transcript: transcription.text,
                },
                RecognizerEvent::Error(code) => RecognitionEvent::Error {
                    code: code.as_str().to_string(),
                },
                RecognizerEvent::End => RecognitionEvent::End,
            };
            if tx.send(mapped).is_err() {
                debug!("Recognition event consumer dropped");
                break;
            }
        }
    });
    rx
}

fn to_app_error(err: SpeechError) -> ApplicationError {
    ApplicationError::Speech(err.to_string())
}
