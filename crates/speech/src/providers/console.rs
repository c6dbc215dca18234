//! Console synthesizer - Renders speech as terminal output

use async_trait::async_trait;

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::SpeechSynthesizer;

/// Synthesizer that "speaks" by writing to stdout
#[derive(Debug, Clone)]
pub struct ConsoleSynthesizer {
    voice: String,
}

impl ConsoleSynthesizer {
    /// Create a console synthesizer using the configured voice name
    pub fn new(config: &SpeechConfig) -> Self {
        Self {
            voice: config.voice.clone(),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for ConsoleSynthesizer {
    #[allow(clippy::print_stdout)]
    async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::SynthesisFailed(
                "nothing to speak".to_string(),
            ));
        }
        println!("\u{1f50a} ({}) {text}", self.voice);
        Ok(())
    }

    async fn is_available(&self) -> bool {
        true
    }

    fn voice(&self) -> &str {
        &self.voice
    }
}
