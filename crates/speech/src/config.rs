//! Configuration for speech processing

use serde::{Deserialize, Serialize};

use crate::error::SpeechError;

/// Configuration for the speech providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// BCP-47 locale tag the recognizer listens in
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Voice name for synthesis
    #[serde(default = "default_voice")]
    pub voice: String,

    /// Keep listening across utterances (unsupported by shipped providers)
    #[serde(default)]
    pub continuous: bool,

    /// Emit interim transcripts (unsupported by shipped providers)
    #[serde(default)]
    pub interim_results: bool,

    /// Delay before a scripted utterance is delivered, in milliseconds
    #[serde(default = "default_utterance_delay_ms")]
    pub utterance_delay_ms: u64,
}

fn default_locale() -> String {
    "en-US".to_string()
}

fn default_voice() -> String {
    "default".to_string()
}

const fn default_utterance_delay_ms() -> u64 {
    150
}

impl SpeechConfig {
    /// Validate that the config requests single-utterance mode
    ///
    /// The shipped providers recognize one final transcript per session and
    /// reject continuous or interim-result configurations up front.
    pub fn validate_single_utterance(&self) -> Result<(), SpeechError> {
        if self.continuous {
            return Err(SpeechError::Configuration(
                "continuous recognition is not supported".to_string(),
            ));
        }
        if self.interim_results {
            return Err(SpeechError::Configuration(
                "interim results are not supported".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            voice: default_voice(),
            continuous: false,
            interim_results: false,
            utterance_delay_ms: default_utterance_delay_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SpeechConfig::default();
        assert_eq!(config.locale, "en-US");
        assert_eq!(config.voice, "default");
        assert!(!config.continuous);
        assert!(!config.interim_results);
        assert_eq!(config.utterance_delay_ms, 150);
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config: SpeechConfig = toml::from_str("").unwrap();
        assert_eq!(config.locale, "en-US");
        assert_eq!(config.utterance_delay_ms, 150);
    }

    #[test]
    fn partial_toml_overrides_fields() {
        let config: SpeechConfig = toml::from_str(
            r#"
            locale = "en-GB"
            utterance_delay_ms = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.locale, "en-GB");
        assert_eq!(config.utterance_delay_ms, 0);
        assert_eq!(config.voice, "default");
    }

    #[test]
    fn single_utterance_validation_accepts_defaults() {
        assert!(SpeechConfig::default().validate_single_utterance().is_ok());
    }

    #[test]
    fn continuous_mode_is_rejected() {
        let config = SpeechConfig {
            continuous: true,
            ..SpeechConfig::default()
        };
        let err = config.validate_single_utterance().unwrap_err();
        assert!(matches!(err, SpeechError::Configuration(_)));
    }

    #[test]
    fn interim_results_are_rejected() {
        let config = SpeechConfig {
            interim_results: true,
            ..SpeechConfig::default()
        };
        assert!(config.validate_single_utterance().is_err());
    }
}
