//! Concrete speech providers
//!
//! Stand-ins for the platform engines: a scripted recognizer for tests and
//! demo playback, a typed recognizer for interactive use, and a console
//! synthesizer.

mod console;
mod scripted;
mod typed;

pub use console::ConsoleSynthesizer;
pub use scripted::ScriptedRecognizer;
pub use typed::TypedRecognizer;
