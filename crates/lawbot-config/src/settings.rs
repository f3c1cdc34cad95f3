//! Process settings read from the environment.

use std::env;
use std::path::PathBuf;

use crate::prompts::DEFAULT_MODEL;
use crate::profiles::ProfileTable;
use crate::ConfigError;

/// Google's OpenAI-compatible endpoint for Gemini models.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai/";

pub const DEFAULT_ADDR: &str = "0.0.0.0:8000";

/// Variables checked, in order, for the backend API key.
const API_KEY_VARS: [&str; 4] = ["LAWBOT_API_KEY", "GOOGLE_API_KEY", "GEMINI_API_KEY", "OPENAI_API_KEY"];

/// Runtime settings for the bot and its host.
#[derive(Debug, Clone)]
pub struct Settings {
    pub model: String,
    pub api_base: String,
    pub api_key: String,
    pub profiles_path: Option<PathBuf>,
    pub addr: String,
}

impl Settings {
    /// Reads settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = API_KEY_VARS
            .iter()
            .find_map(|&key| non_empty(key))
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            model: non_empty("LAWBOT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: non_empty("LAWBOT_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            api_key,
            profiles_path: non_empty("LAWBOT_PROFILES").map(PathBuf::from),
            addr: non_empty("LAWBOT_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string()),
        })
    }

    /// Builds the profile table, applying the override file when one is set.
    pub fn profiles(&self) -> Result<ProfileTable, ConfigError> {
        match &self.profiles_path {
            Some(path) => ProfileTable::load_from_file(path, &self.model),
            None => Ok(ProfileTable::builtin(&self.model)),
        }
    }
}
