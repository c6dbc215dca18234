//! UI preferences entity

use serde::{Deserialize, Serialize};

use crate::value_objects::FontScale;

/// Session-scoped display preferences
///
/// Mutated only by dispatcher effects or the direct theme-toggle control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UiPreferences {
    /// Whether dark mode is active
    #[serde(default)]
    pub dark_mode: bool,
    /// Current font scale
    #[serde(default)]
    pub font_scale: FontScale,
}

impl UiPreferences {
    /// Create preferences with the given dark-mode setting
    pub fn new(dark_mode: bool, font_scale: FontScale) -> Self {
        Self {
            dark_mode,
            font_scale,
        }
    }

    /// Flip the dark-mode flag
    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    /// Step the font scale up
    pub fn increase_font_scale(&mut self) {
        self.font_scale.increase();
    }

    /// Step the font scale down
    pub fn decrease_font_scale(&mut self) {
        self.font_scale.decrease();
    }
}
