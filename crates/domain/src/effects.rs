//! UI effects - Side-effect commands returned by the intent dispatcher
//!
//! The dispatcher never mutates session state itself; it returns effects as
//! data and the session applies them.

use serde::{Deserialize, Serialize};

/// A side effect requested by a dispatched reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum UiEffect {
    /// Flip the dark-mode preference
    ToggleDarkMode,
    /// Empty the conversation log
    ClearLog,
    /// Bump the font scale one step up
    IncreaseFontScale,
    /// Bump the font scale one step down
    DecreaseFontScale,
}

impl UiEffect {
    /// Get a human-readable description of the effect
    pub const fn description(&self) -> &'static str {
        match self {
            Self::ToggleDarkMode => "toggle dark mode",
            Self::ClearLog => "clear conversation log",
            Self::IncreaseFontScale => "increase font scale",
            Self::DecreaseFontScale => "decrease font scale",
        }
    }
}
