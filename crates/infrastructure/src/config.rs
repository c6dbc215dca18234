//! Application configuration
//!
//! Loaded from defaults, an optional `config.toml`, and `VOXSHELL_*`
//! environment overrides, in that order.

use std::path::Path;

use application::ApplicationError;
use application::session::SessionSettings;
use domain::{FontScale, UiPreferences};
use serde::{Deserialize, Serialize};
use speech::SpeechConfig;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log format: "json" for structured JSON logs, "text" for human-readable
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Turn-taking configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Speech provider configuration
    #[serde(default)]
    pub speech: SpeechConfig,

    /// UI preference defaults
    #[serde(default)]
    pub ui: UiConfig,
}

/// Turn-taking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Thinking delay before the reply is committed, in milliseconds
    #[serde(default = "default_thinking_delay_ms")]
    pub thinking_delay_ms: u64,

    /// Text of the placeholder turn shown during the delay
    #[serde(default = "default_placeholder_text")]
    pub placeholder_text: String,
}

/// UI preference defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Start in dark mode
    #[serde(default)]
    pub dark_mode: bool,

    /// Initial font scale as a percentage of the base size
    #[serde(default = "default_font_scale_percent")]
    pub font_scale_percent: u16,
}

fn default_log_format() -> String {
    "text".to_string()
}

const fn default_thinking_delay_ms() -> u64 {
    750
}

fn default_placeholder_text() -> String {
    "Thinking...".to_string()
}

const fn default_font_scale_percent() -> u16 {
    100
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_format: default_log_format(),
            session: SessionConfig::default(),
            speech: SpeechConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            thinking_delay_ms: default_thinking_delay_ms(),
            placeholder_text: default_placeholder_text(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            dark_mode: false,
            font_scale_percent: default_font_scale_percent(),
        }
    }
}

impl SessionConfig {
    /// Convert to the application's session settings
    pub fn to_settings(&self) -> SessionSettings {
        SessionSettings {
            thinking_delay_ms: self.thinking_delay_ms,
            placeholder_text: self.placeholder_text.clone(),
        }
    }
}

impl UiConfig {
    /// Convert to validated UI preferences
    pub fn to_preferences(&self) -> Result<UiPreferences, ApplicationError> {
        let font_scale = FontScale::from_percent(self.font_scale_percent)
            .map_err(ApplicationError::Domain)?;
        Ok(UiPreferences::new(self.dark_mode, font_scale))
    }
}

impl AppConfig {
    /// Load configuration from environment and the default `config` file
    pub fn load() -> Result<Self, ::config::ConfigError> {
        Self::load_with(None)
    }

    /// Load configuration, reading the given file instead of `config.toml`
    pub fn load_with(path: Option<&Path>) -> Result<Self, ::config::ConfigError> {
        let builder = ::config::Config::builder()
            // Start with defaults
            .set_default("log_format", "text")?
            .set_default("session.thinking_delay_ms", 750)?
            .set_default("speech.locale", "en-US")?;

        // Load from file if exists
        let builder = match path {
            Some(path) => builder.add_source(::config::File::from(path)),
            None => builder.add_source(::config::File::with_name("config").required(false)),
        };

        // Override with environment variables (e.g., VOXSHELL_SESSION__THINKING_DELAY_MS)
        let config = builder
            .add_source(
                ::config::Environment::with_prefix("VOXSHELL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        config.try_deserialize()
    }
}
