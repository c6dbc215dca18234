//! Port definitions consumed by the application layer

mod speech;

pub use speech::{RecognitionEvent, SpeechInputPort, SpeechOutputPort};

#[cfg(test)]
pub use speech::{MockSpeechInputPort, MockSpeechOutputPort};
