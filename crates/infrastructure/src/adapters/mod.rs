//! Adapters implementing application ports over the speech providers

mod speech_adapter;

pub use speech_adapter::{RecognizerAdapter, SynthesizerAdapter, bridge_recognizer_events};
