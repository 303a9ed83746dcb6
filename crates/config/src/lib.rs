//! Configuration loading, validation, and management for Park Guide.
//!
//! Loads configuration from `~/.parkguide/config.toml` with environment
//! variable overrides. Validates all settings at startup. The completion
//! API credential is resolved separately, see [`credentials`].

pub mod credentials;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use credentials::{
    API_KEY_VAR, Credential, CredentialReport, CredentialSource, SecretStoreStatus,
};

/// The root configuration structure.
///
/// Maps directly to `~/.parkguide/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Completion API settings for the assistant
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Live hours scraping settings
    #[serde(default)]
    pub live_info: LiveInfoConfig,

    /// HTTP server settings
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Secret store location
    #[serde(default)]
    pub secrets: SecretsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Model identifier passed to the completion API
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Upper bound on generated tokens per reply
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Per-request timeout for the completion call
    #[serde(default = "default_assistant_timeout")]
    pub timeout_secs: u64,

    /// Override the completion API base URL (tests, proxies)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

fn default_model() -> String {
    "gemini-2.5-flash".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    1024
}
fn default_assistant_timeout() -> u64 {
    60
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_assistant_timeout(),
            api_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveInfoConfig {
    /// When false the fallback value is served without any network call
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// The external hours page to scrape
    #[serde(default = "default_source_url")]
    pub source_url: String,

    /// Request timeout, at most 10 seconds
    #[serde(default = "default_live_timeout")]
    pub timeout_secs: u64,

    /// How long a fetched value is served before refetching
    #[serde(default = "default_freshness")]
    pub freshness_secs: u64,

    /// The park's UTC offset, used to decide what "today" is
    #[serde(default = "default_utc_offset")]
    pub utc_offset_hours: i32,
}

fn default_true() -> bool {
    true
}
fn default_source_url() -> String {
    "https://www.shanghaidisneyresort.com/en/calendars/park-hours/".into()
}
fn default_live_timeout() -> u64 {
    10
}
fn default_freshness() -> u64 {
    3600
}
fn default_utc_offset() -> i32 {
    8
}

impl Default for LiveInfoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            source_url: default_source_url(),
            timeout_secs: default_live_timeout(),
            freshness_secs: default_freshness(),
            utc_offset_hours: default_utc_offset(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Maximum concurrent assistant sessions before the least recently
    /// active one is evicted
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Sessions idle for longer than this are torn down
    #[serde(default = "default_session_idle")]
    pub session_idle_minutes: u64,
}

fn default_port() -> u16 {
    8501
}
fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_max_sessions() -> usize {
    1_000
}
fn default_session_idle() -> u64 {
    60
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            max_sessions: default_max_sessions(),
            session_idle_minutes: default_session_idle(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecretsConfig {
    /// Path of the secrets file. Defaults to `~/.parkguide/secrets.toml`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl AppConfig {
    /// Load configuration from the default path (~/.parkguide/config.toml).
    ///
    /// Environment overrides:
    /// - `PARKGUIDE_MODEL`
    /// - `PARKGUIDE_PORT`
    /// - `PARKGUIDE_HOURS_URL`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides using the given lookup.
    pub fn apply_env_overrides(
        &mut self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(model) = env("PARKGUIDE_MODEL") {
            self.assistant.model = model;
        }

        if let Some(port) = env("PARKGUIDE_PORT") {
            self.gateway.port = port.parse().map_err(|_| {
                ConfigError::ValidationError(format!("PARKGUIDE_PORT is not a valid port: {port}"))
            })?;
        }

        if let Some(url) = env("PARKGUIDE_HOURS_URL") {
            self.live_info.source_url = url;
        }

        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".parkguide")
    }

    /// Resolved path of the secrets file.
    pub fn secrets_path(&self) -> PathBuf {
        self.secrets
            .path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| Self::config_dir().join("secrets.toml"))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.assistant.temperature) {
            return Err(ConfigError::ValidationError(
                "assistant.temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.assistant.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "assistant.timeout_secs must be > 0".into(),
            ));
        }

        if !(1..=10).contains(&self.live_info.timeout_secs) {
            return Err(ConfigError::ValidationError(
                "live_info.timeout_secs must be between 1 and 10".into(),
            ));
        }

        if self.live_info.freshness_secs == 0 {
            return Err(ConfigError::ValidationError(
                "live_info.freshness_secs must be > 0".into(),
            ));
        }

        if !(-12..=14).contains(&self.live_info.utc_offset_hours) {
            return Err(ConfigError::ValidationError(
                "live_info.utc_offset_hours must be between -12 and 14".into(),
            ));
        }

        if self.gateway.max_sessions == 0 {
            return Err(ConfigError::ValidationError(
                "gateway.max_sessions must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for the `init` command).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            assistant: AssistantConfig::default(),
            live_info: LiveInfoConfig::default(),
            gateway: GatewayConfig::default(),
            secrets: SecretsConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.assistant.model, "gemini-2.5-flash");
        assert_eq!(config.live_info.freshness_secs, 3600);
        assert_eq!(config.live_info.timeout_secs, 10);
        assert_eq!(config.gateway.port, 8501);
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.assistant.model, config.assistant.model);
        assert_eq!(parsed.live_info.source_url, config.live_info.source_url);
    }

    #[test]
    fn invalid_temperature_rejected() {
        let mut config = AppConfig::default();
        config.assistant.temperature = 5.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn live_timeout_above_ten_seconds_rejected() {
        let mut config = AppConfig::default();
        config.live_info.timeout_secs = 11;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("live_info.timeout_secs"));
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.assistant.model, "gemini-2.5-flash");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[live_info]
source_url = "http://localhost:9999/hours"
freshness_secs = 600

[gateway]
port = 9000
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.live_info.source_url, "http://localhost:9999/hours");
        assert_eq!(config.live_info.freshness_secs, 600);
        assert_eq!(config.live_info.timeout_secs, 10);
        assert_eq!(config.gateway.port, 9000);
        assert_eq!(config.assistant.temperature, 0.7);
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[gateway\nport = ").unwrap();
        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn env_overrides_apply() {
        let vars: HashMap<&str, &str> = [
            ("PARKGUIDE_MODEL", "gemini-2.0-flash"),
            ("PARKGUIDE_PORT", "9123"),
            ("PARKGUIDE_HOURS_URL", "http://example.test/hours"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config
            .apply_env_overrides(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.assistant.model, "gemini-2.0-flash");
        assert_eq!(config.gateway.port, 9123);
        assert_eq!(config.live_info.source_url, "http://example.test/hours");
    }

    #[test]
    fn bad_port_override_rejected() {
        let mut config = AppConfig::default();
        let result = config.apply_env_overrides(|k| {
            (k == "PARKGUIDE_PORT").then(|| "not-a-port".to_string())
        });
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn secrets_path_defaults_under_config_dir() {
        let config = AppConfig::default();
        assert!(config.secrets_path().ends_with(".parkguide/secrets.toml"));

        let mut custom = AppConfig::default();
        custom.secrets.path = Some("/run/secrets/park.toml".into());
        assert_eq!(custom.secrets_path(), PathBuf::from("/run/secrets/park.toml"));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("gemini-2.5-flash"));
        assert!(toml_str.contains("8501"));
    }
}
