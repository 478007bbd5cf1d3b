//! Configuration model.
//!
//! Every field carries a serde default so a partial (or missing) `config.toml`
//! always yields a usable configuration.

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct RootConfig {
    #[serde(default)]
    pub onboarding: OnboardingSettings,
    #[serde(default)]
    pub chat: ChatSettings,
    #[serde(default)]
    pub oracle: OracleSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Limits enforced by the draft accumulator.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct OnboardingSettings {
    pub min_hobbies: usize,
    pub max_hobbies: usize,
    pub max_binary_choices: usize,
    pub max_vibe_tags: usize,
    pub fun_line_max_len: usize,
    pub bio_max_len: usize,
}

impl Default for OnboardingSettings {
    fn default() -> Self {
        Self {
            min_hobbies: 3,
            max_hobbies: 5,
            max_binary_choices: 3,
            max_vibe_tags: 2,
            fun_line_max_len: 80,
            bio_max_len: 500,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ChatSettings {
    /// Maximum characters per message
    pub max_message_len: usize,
    /// Automatic confirmation retries before a send is marked failed
    pub confirm_retries: u32,
    /// Per-match live channel buffer
    pub live_buffer: usize,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            max_message_len: 1000,
            confirm_retries: 1,
            live_buffer: 128,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct OracleSettings {
    pub enabled: bool,
    pub model: String,
    pub image_model: String,
    pub timeout_ms: u64,
    /// Environment variable holding the API key
    pub api_key_env: String,
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            model: "gemini-2.5-flash".to_string(),
            image_model: "imagen-4.0-generate-001".to_string(),
            timeout_ms: 8000,
            api_key_env: "GEMINI_API_KEY".to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}
