//! Configuration management for Steam Sentinel
//!
//! Loads configuration from YAML files and environment variables.
//! Environment variables override YAML values.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Steam endpoint configuration
    pub steam: SteamConfig,
    /// Checker pacing and retry configuration
    pub checker: CheckerConfig,
    /// Input token file configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Report output configuration
    #[serde(default)]
    pub report: ReportConfig,
}

/// Steam endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SteamConfig {
    /// Steam Web API key (loaded from env: SENTINEL_STEAM__API_KEY)
    #[serde(default)]
    pub api_key: String,
    /// Steam Web API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Store account page used for the session liveness probe
    #[serde(default = "default_session_check_url")]
    pub session_check_url: String,
}

fn default_api_base_url() -> String {
    "https://api.steampowered.com".to_string()
}

fn default_session_check_url() -> String {
    "https://store.steampowered.com/account/".to_string()
}

/// Checker pacing and retry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CheckerConfig {
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Maximum attempts per remote operation
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Wait between retry attempts in milliseconds
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
    /// Wait between credentials in seconds (request-rate throttle)
    #[serde(default = "default_delay_between")]
    pub delay_between_requests_secs: u64,
}

fn default_request_timeout() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    1000
}

fn default_delay_between() -> u64 {
    2
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay(),
            delay_between_requests_secs: default_delay_between(),
        }
    }
}

/// Input token file configuration
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Path to the JSON file containing session credentials
    #[serde(default = "default_input_path")]
    pub path: PathBuf,
}

fn default_input_path() -> PathBuf {
    PathBuf::from("tokens.json")
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_input_path(),
        }
    }
}

/// Report output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Path for the generated HTML report
    #[serde(default = "default_report_path")]
    pub output_path: PathBuf,
    /// Path for the exported valid-token JSON
    #[serde(default = "default_valid_tokens_path")]
    pub valid_tokens_path: PathBuf,
    /// Report title
    #[serde(default = "default_report_title")]
    pub title: String,
}

fn default_report_path() -> PathBuf {
    PathBuf::from("steam_account_report.html")
}

fn default_valid_tokens_path() -> PathBuf {
    PathBuf::from("valid_tokens.json")
}

fn default_report_title() -> String {
    "Steam Account Validation Report".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_path: default_report_path(),
            valid_tokens_path: default_valid_tokens_path(),
            title: default_report_title(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (SENTINEL_*)
    /// 2. config/config.yaml (if exists)
    /// 3. config.yaml (if exists)
    /// 4. Default values
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default values
            .set_default("steam.api_base_url", default_api_base_url())?
            .set_default("steam.session_check_url", default_session_check_url())?
            .set_default("checker.request_timeout_secs", 10)?
            .set_default("checker.max_retries", 3)?
            .set_default("checker.retry_delay_ms", 1000)?
            .set_default("checker.delay_between_requests_secs", 2)?
            // Load from config files (lower priority)
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name("config/config").required(false))
            // Override with environment variables (highest priority - loaded last)
            // SENTINEL_STEAM__API_KEY=... -> steam.api_key = ...
            // SENTINEL_CHECKER__MAX_RETRIES=5 -> checker.max_retries = 5
            .add_source(
                Environment::with_prefix("SENTINEL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steam.api_key.is_empty() {
            return Err(ConfigError::Message(
                "Steam Web API key must be set via SENTINEL_STEAM__API_KEY".to_string(),
            ));
        }

        if self.steam.session_check_url.is_empty() {
            return Err(ConfigError::Message(
                "Session check URL must be set".to_string(),
            ));
        }

        if self.checker.max_retries == 0 {
            return Err(ConfigError::Message(
                "checker.max_retries must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
