//! Infrastructure layer - Configuration, telemetry, and port adapters
//!
//! Bridges the `speech` providers to the application's ports and hosts the
//! pieces every binary needs at startup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::{RecognizerAdapter, SynthesizerAdapter, bridge_recognizer_events};
pub use config::{AppConfig, SessionConfig, UiConfig};
pub use telemetry::init_telemetry;
