//! Configuration schema.
//!
//! Every section and field has a default, so an empty TOML document is a
//! valid configuration equivalent to `HealixConfig::default()`.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "deepseek/deepseek-r1-0528:free";
pub const DEFAULT_API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Top-level configuration for a HEALIX runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealixConfig {
    /// Hosted chat providers, tried in order. Empty means offline only.
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderConfig>,
    #[serde(default)]
    pub emergency: EmergencyConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
}

impl Default for HealixConfig {
    fn default() -> Self {
        Self {
            providers: default_providers(),
            emergency: EmergencyConfig::default(),
            reveal: RevealConfig::default(),
        }
    }
}

fn default_providers() -> Vec<ProviderConfig> {
    vec![ProviderConfig {
        name: "openrouter".to_string(),
        base_url: DEFAULT_BASE_URL.to_string(),
        model: DEFAULT_MODEL.to_string(),
        api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        temperature: default_temperature(),
        timeout_secs: default_timeout_secs(),
        referer: default_referer(),
        title: default_title(),
    }]
}

/// One OpenAI-compatible chat completions endpoint.
///
/// The API key itself is never stored here; `api_key_env` names the
/// environment variable that holds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Label used in logs.
    pub name: String,
    pub base_url: String,
    pub model: String,
    pub api_key_env: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Sent as `HTTP-Referer`.
    #[serde(default = "default_referer")]
    pub referer: String,
    /// Sent as `X-Title`.
    #[serde(default = "default_title")]
    pub title: String,
}

impl ProviderConfig {
    /// Read the API key from the environment. Blank values count as unset.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_referer() -> String {
    "http://localhost:3000".to_string()
}

fn default_title() -> String {
    "HEALIX Medical Dashboard".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyConfig {
    /// Local emergency number, dialed as `CALL_<number>`.
    #[serde(default = "default_number")]
    pub number: String,
    #[serde(default = "default_countdown_secs")]
    pub countdown_secs: u32,
}

impl Default for EmergencyConfig {
    fn default() -> Self {
        Self { number: default_number(), countdown_secs: default_countdown_secs() }
    }
}

fn default_number() -> String {
    "102".to_string()
}

fn default_countdown_secs() -> u32 {
    10
}

/// How offline replies are split into typewriter frames.
///
/// Example in TOML:
/// ```toml
/// mode = "words"
/// mode = "chars"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevealStyle {
    Words,
    #[default]
    Chars,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealConfig {
    #[serde(default)]
    pub mode: RevealStyle,
    /// Frame size in `chars` mode.
    #[serde(default = "default_chars_per_frame")]
    pub chars_per_frame: usize,
    #[serde(default = "default_frame_delay_ms")]
    pub frame_delay_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            mode: RevealStyle::default(),
            chars_per_frame: default_chars_per_frame(),
            frame_delay_ms: default_frame_delay_ms(),
        }
    }
}

fn default_chars_per_frame() -> usize {
    20
}

fn default_frame_delay_ms() -> u64 {
    30
}
