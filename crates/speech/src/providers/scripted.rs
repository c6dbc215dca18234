//! Scripted recognizer - Plays back a fixed queue of utterances
//!
//! Each `start()` delivers the next scripted line as the session's final
//! transcript after the configured delay. When the script runs dry the
//! session fails with `no-speech`. Used by tests and the `--script` demo
//! mode.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::SpeechRecognizer;
use crate::types::{RecognitionErrorCode, RecognizerEvent, Transcription};

/// Recognizer that replays a fixed script, one utterance per session
#[derive(Clone)]
pub struct ScriptedRecognizer {
    inner: Arc<Inner>,
}

struct Inner {
    config: SpeechConfig,
    script: Mutex<VecDeque<String>>,
    active: AtomicBool,
    // Bumped on every start/stop so a stopped session's in-flight delivery
    // task can tell it went stale.
    generation: AtomicU64,
    events: mpsc::UnboundedSender<RecognizerEvent>,
}

impl fmt::Debug for ScriptedRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptedRecognizer")
            .field("locale", &self.inner.config.locale)
            .field("remaining", &self.remaining())
            .field("active", &self.is_active())
            .finish()
    }
}

impl ScriptedRecognizer {
    /// Create a scripted recognizer and the receiving end of its events
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the config requests
    /// continuous or interim-result recognition.
    pub fn new(
        config: SpeechConfig,
        script: Vec<String>,
    ) -> Result<(Self, mpsc::UnboundedReceiver<RecognizerEvent>), SpeechError> {
        config.validate_single_utterance()?;
        let (tx, rx) = mpsc::unbounded_channel();
        let recognizer = Self {
            inner: Arc::new(Inner {
                config,
                script: Mutex::new(script.into()),
                active: AtomicBool::new(false),
                generation: AtomicU64::new(0),
                events: tx,
            }),
        };
        Ok((recognizer, rx))
    }

    /// Number of scripted utterances not yet played back
    pub fn remaining(&self) -> usize {
        self.inner.script.lock().len()
    }

    fn language_tag(&self) -> Option<String> {
        self.inner
            .config
            .locale
            .split('-')
            .next()
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
    }
}

#[async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    async fn start(&self) -> Result<(), SpeechError> {
        if self
            .inner
            .active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SpeechError::AlreadyActive);
        }

        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let utterance = self.inner.script.lock().pop_front();
        let language = self.language_tag();
        let delay = Duration::from_millis(self.inner.config.utterance_delay_ms);
        let inner = Arc::clone(&self.inner);

        debug!(?utterance, generation, "Scripted session started");

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            // A stop() mid-delay bumped the generation; the session already
            // emitted End, so this delivery is dropped.
            if inner.generation.load(Ordering::SeqCst) != generation {
                return;
            }

            let result = match utterance {
                Some(text) => {
                    let mut transcription = Transcription::new(text);
                    if let Some(language) = language {
                        transcription = transcription.with_language(language);
                    }
                    RecognizerEvent::Result(transcription)
                },
                None => RecognizerEvent::Error(RecognitionErrorCode::NoSpeech),
            };

            inner.active.store(false, Ordering::SeqCst);
            if inner.events.send(result).is_err() || inner.events.send(RecognizerEvent::End).is_err()
            {
                warn!("Recognizer event receiver dropped");
            }
        });

        Ok(())
    }

    async fn stop(&self) -> Result<(), SpeechError> {
        if self
            .inner
            .active
            .compare_exchange(true, false, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Ok(());
        }

        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        self.inner
            .events
            .send(RecognizerEvent::End)
            .map_err(|_| SpeechError::ChannelClosed)
    }

    fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::SeqCst)
    }

    fn locale(&self) -> &str {
        &self.inner.config.locale
    }
}
