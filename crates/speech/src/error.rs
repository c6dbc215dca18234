//! Speech processing errors

use thiserror::Error;

/// Errors that can occur during speech processing
#[derive(Debug, Error)]
pub enum SpeechError {
    /// A recognition session is already active
    #[error("Recognition session already active")]
    AlreadyActive,

    /// No recognition session is active
    #[error("No recognition session active")]
    NotActive,

    /// The event channel was dropped by the consumer
    #[error("Recognizer event channel closed")]
    ChannelClosed,

    /// Provider not available on this platform
    #[error("Provider not available: {0}")]
    NotAvailable(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Synthesis failed
    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),
}
