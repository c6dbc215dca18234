//! Font scale preference
//!
//! Stored as a percentage of the base size, adjusted in fixed steps and
//! clamped to the supported range.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

const MIN_PERCENT: u16 = 50;
const MAX_PERCENT: u16 = 200;
const STEP_PERCENT: u16 = 10;
const DEFAULT_PERCENT: u16 = 100;

/// Font scale as a percentage of the base size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct FontScale(u16);

impl FontScale {
    /// Create a font scale from a percentage
    pub fn from_percent(percent: u16) -> Result<Self, DomainError> {
        if (MIN_PERCENT..=MAX_PERCENT).contains(&percent) {
            Ok(Self(percent))
        } else {
            Err(DomainError::InvalidFontScale {
                percent,
                min: MIN_PERCENT,
                max: MAX_PERCENT,
            })
        }
    }

    /// Get the scale as a percentage
    pub const fn percent(&self) -> u16 {
        self.0
    }

    /// Get the scale as a multiplier (1.0 = base size)
    pub fn factor(&self) -> f32 {
        f32::from(self.0) / 100.0
    }

    /// Step the scale up, saturating at the maximum
    pub fn increase(&mut self) {
        self.0 = (self.0 + STEP_PERCENT).min(MAX_PERCENT);
    }

    /// Step the scale down, saturating at the minimum
    pub fn decrease(&mut self) {
        self.0 = self.0.saturating_sub(STEP_PERCENT).max(MIN_PERCENT);
    }
}

impl Default for FontScale {
    fn default() -> Self {
        Self(DEFAULT_PERCENT)
    }
}

impl fmt::Display for FontScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u16> for FontScale {
    type Error = DomainError;

    fn try_from(percent: u16) -> Result<Self, Self::Error> {
        Self::from_percent(percent)
    }
}

impl From<FontScale> for u16 {
    fn from(scale: FontScale) -> Self {
        scale.0
    }
}
