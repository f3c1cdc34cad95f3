//! Agent profile table, built-in prompts, and environment settings.
//!
//! Profiles are static: they are created once at process start (optionally
//! overlaid with a JSON override file) and shared read-only afterwards.

mod profiles;
pub mod prompts;
mod settings;

use lawbot_core::AgentError;

pub use profiles::{ProfileOverride, ProfileTable};
pub use settings::{Settings, DEFAULT_ADDR, DEFAULT_API_BASE};

/// Configuration parsing and loading errors.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No API key found (set LAWBOT_API_KEY, GOOGLE_API_KEY, GEMINI_API_KEY or OPENAI_API_KEY)")]
    MissingApiKey,
}

impl From<ConfigError> for AgentError {
    fn from(err: ConfigError) -> Self {
        AgentError::Config(err.to_string())
    }
}
