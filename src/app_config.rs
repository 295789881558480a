use anyhow::{Result, anyhow, Context};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;
use url::Url;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Telegram delivery settings
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Language-model generation settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Session store settings
    #[serde(default)]
    pub session: SessionConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Generation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GenerationProvider {
    // @provider: Groq (OpenAI-compatible hosted API)
    #[default]
    Groq,
}

impl GenerationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Groq => "Groq",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Groq => "groq".to_string(),
        }
    }
}

// Implement Display trait for GenerationProvider
impl std::fmt::Display for GenerationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for GenerationProvider
impl std::str::FromStr for GenerationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "groq" => Ok(Self::Groq),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Telegram Bot API configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TelegramConfig {
    /// Bot token, also readable from the TUTORBOT_TELEGRAM_TOKEN environment variable
    #[serde(default = "String::new")]
    pub token: String,

    /// Long-poll timeout in seconds for getUpdates
    #[serde(default = "default_poll_timeout_secs")]
    pub poll_timeout_secs: u64,
}

impl TelegramConfig {
    /// Resolve the bot token, preferring the environment variable over the config file
    pub fn resolved_token(&self) -> String {
        std::env::var("TUTORBOT_TELEGRAM_TOKEN").unwrap_or_else(|_| self.token.clone())
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            poll_timeout_secs: default_poll_timeout_secs(),
        }
    }
}

/// Language-model generation configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerationConfig {
    /// Generation provider to use
    #[serde(default)]
    pub provider: GenerationProvider,

    /// Model name (e.g., "llama-3.3-70b-specdec")
    #[serde(default = "default_model")]
    pub model: String,

    /// API key, also readable from the GROQ_API_KEY environment variable
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Temperature parameter for text generation (0.0 to 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum number of tokens to generate per request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl GenerationConfig {
    /// Resolve the API key, preferring the environment variable over the config file
    pub fn resolved_api_key(&self) -> String {
        std::env::var("GROQ_API_KEY").unwrap_or_else(|_| self.api_key.clone())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: GenerationProvider::default(),
            model: default_model(),
            api_key: String::new(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Session store configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionConfig {
    /// Evict sessions idle longer than this many minutes (0 disables eviction)
    #[serde(default = "default_idle_ttl_mins")]
    pub idle_ttl_mins: u64,

    /// Interval in minutes between idle-session sweeps
    #[serde(default = "default_purge_interval_mins")]
    pub purge_interval_mins: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_ttl_mins: default_idle_ttl_mins(),
            purge_interval_mins: default_purge_interval_mins(),
        }
    }
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_poll_timeout_secs() -> u64 {
    30
}

fn default_model() -> String {
    "llama-3.3-70b-specdec".to_string()
}

fn default_endpoint() -> String {
    "https://api.groq.com".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    500
}

fn default_idle_ttl_mins() -> u64 {
    1440 // 24 hours
}

fn default_purge_interval_mins() -> u64 {
    60
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .context(format!("Failed to read config file: {}", path.as_ref().display()))?;
        let config: Config = serde_json::from_str(&content)
            .context(format!("Failed to parse config file: {}", path.as_ref().display()))?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path.as_ref(), content)
            .context(format!("Failed to write config file: {}", path.as_ref().display()))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.telegram.resolved_token().is_empty() {
            return Err(anyhow!(
                "Telegram bot token is required (set telegram.token or TUTORBOT_TELEGRAM_TOKEN)"
            ));
        }

        if self.generation.resolved_api_key().is_empty() {
            return Err(anyhow!(
                "Generation API key is required for the {} provider (set generation.api_key or GROQ_API_KEY)",
                self.generation.provider.display_name()
            ));
        }

        Url::parse(&self.generation.endpoint)
            .map_err(|e| anyhow!("Invalid generation endpoint '{}': {}", self.generation.endpoint, e))?;

        if self.generation.model.is_empty() {
            return Err(anyhow!("Generation model name must not be empty"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            telegram: TelegramConfig::default(),
            generation: GenerationConfig::default(),
            session: SessionConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
