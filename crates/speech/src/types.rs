//! Shared types for speech processing

use serde::{Deserialize, Serialize};

/// A finished transcription of one utterance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    /// The transcribed text
    pub text: String,
    /// Language the recognizer detected, if reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Confidence score (0.0 - 1.0), if reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl Transcription {
    /// Create a transcription with just text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: None,
            confidence: None,
        }
    }

    /// Attach the detected language
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Attach a confidence score
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// Error vocabulary reported by recognition engines
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionErrorCode {
    /// Microphone permission denied
    NotAllowed,
    /// The session ended without detecting speech
    NoSpeech,
    /// Audio capture failed (no device, device busy)
    AudioCapture,
    /// The engine could not be reached
    Network,
    /// The session was aborted before producing a result
    Aborted,
    /// Engine-specific code not covered above
    Other(String),
}

impl RecognitionErrorCode {
    /// The engine's string form of the code
    pub fn as_str(&self) -> &str {
        match self {
            Self::NotAllowed => "not-allowed",
            Self::NoSpeech => "no-speech",
            Self::AudioCapture => "audio-capture",
            Self::Network => "network",
            Self::Aborted => "aborted",
            Self::Other(code) => code,
        }
    }

    /// Parse an engine error string into the known vocabulary
    pub fn from_code(code: &str) -> Self {
        match code {
            "not-allowed" => Self::NotAllowed,
            "no-speech" => Self::NoSpeech,
            "audio-capture" => Self::AudioCapture,
            "network" => Self::Network,
            "aborted" => Self::Aborted,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for RecognitionErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Events emitted by one recognition session
///
/// Delivery order within a session is `Result` then `End`, or `Error` then
/// `End`. Sessions never interleave.
#[derive(Debug, Clone, PartialEq)]
pub enum RecognizerEvent {
    /// A final transcript (no interim results)
    Result(Transcription),
    /// The session failed
    Error(RecognitionErrorCode),
    /// The session ended
    End,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcription_builder() {
        let t = Transcription::new("hello there")
            .with_language("en")
            .with_confidence(0.92);
        assert_eq!(t.text, "hello there");
        assert_eq!(t.language.as_deref(), Some("en"));
        assert_eq!(t.confidence, Some(0.92));
    }

    #[test]
    fn transcription_serializes_without_empty_options() {
        let json = serde_json::to_string(&Transcription::new("hi")).unwrap();
        assert_eq!(json, r#"{"text":"hi"}"#);
    }

    #[test]
    fn error_code_roundtrips_through_string() {
        for code in [
            RecognitionErrorCode::NotAllowed,
            RecognitionErrorCode::NoSpeech,
            RecognitionErrorCode::AudioCapture,
            RecognitionErrorCode::Network,
            RecognitionErrorCode::Aborted,
        ] {
            assert_eq!(RecognitionErrorCode::from_code(code.as_str()), code);
        }
    }

    #[test]
    fn unknown_code_is_preserved() {
        let code = RecognitionErrorCode::from_code("service-not-allowed");
        assert_eq!(
            code,
            RecognitionErrorCode::Other("service-not-allowed".to_string())
        );
        assert_eq!(code.as_str(), "service-not-allowed");
    }

    #[test]
    fn display_matches_engine_form() {
        assert_eq!(RecognitionErrorCode::NoSpeech.to_string(), "no-speech");
    }
}
