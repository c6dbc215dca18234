//! Speech - Recognition and synthesis abstractions
//!
//! Provides traits and stand-in implementations for the platform speech
//! engines:
//! - `SpeechRecognizer` - Turn one utterance into a transcript (input)
//! - `SpeechSynthesizer` - Speak a reply aloud (output)
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the traits (ports)
//! - `providers` module contains concrete implementations (adapters)
//!
//! A recognizer emits events for exactly one session at a time, always in
//! the order `Result` then `End` (or `Error` then `End`). The platform
//! engines themselves are external collaborators; the shipped providers are
//! deterministic stand-ins for tests, demos, and the terminal shell.
//!
//! # Example
//!
//! ```ignore
//! use speech::{ScriptedRecognizer, SpeechConfig, SpeechRecognizer};
//!
//! let (recognizer, mut events) = ScriptedRecognizer::new(
//!     SpeechConfig::default(),
//!     vec!["hello there".to_string()],
//! );
//!
//! recognizer.start().await?;
//! while let Some(event) = events.recv().await {
//!     println!("{event:?}");
//! }
//! ```

pub mod config;
pub mod error;
pub mod ports;
pub mod providers;
pub mod types;

pub use config::SpeechConfig;
pub use error::SpeechError;
pub use ports::{SpeechRecognizer, SpeechSynthesizer};
pub use providers::{ConsoleSynthesizer, ScriptedRecognizer, TypedRecognizer};
pub use types::{RecognitionErrorCode, RecognizerEvent, Transcription};
