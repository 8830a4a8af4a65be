use serde::{Deserialize, Serialize};

use crate::error::{FixtureError, Result};

const MAX_RETRIES: u32 = 10;
pub const MAX_RETRY_DELAY_MS: u64 = 60_000;

/// Main configuration structure loaded from fixture_app.toml and environment variables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

/// Endpoint settings used by `App::run`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    pub api_key: String,
    pub endpoint: String,
    pub timeout_ms: u64,
    /// Extra attempts after the first failed fetch; 0 keeps `run` to a single GET
    pub retries: u32,
    pub retry_delay_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: "https://api.example.com/data".to_string(),
            timeout_ms: 5000,
            retries: 0,
            retry_delay_ms: 200,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "fixture_app=info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file and environment variables
    /// Uses FIXTURE_APP_CONFIG environment variable or defaults to "fixture_app.toml"
    pub fn load() -> Result<Self> {
        if let Ok(env_path) = std::env::var("FIXTURE_ENV_FILE") {
            let _ = dotenvy::from_path(env_path);
        } else {
            let _ = dotenvy::dotenv();
        }

        let config_path = std::env::var("FIXTURE_APP_CONFIG")
            .unwrap_or_else(|_| "fixture_app.toml".to_string());

        let mut config: Config = if let Ok(content) = std::fs::read_to_string(&config_path) {
            toml::from_str(&content)?
        } else {
            tracing::warn!("Config file {} not found, using defaults", config_path);
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document without consulting the environment
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply env-first overrides; `lookup` is `std::env::var` outside of tests
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("FIXTURE_API_KEY") {
            self.api.api_key = key;
        }
        if let Some(endpoint) = lookup("FIXTURE_ENDPOINT") {
            tracing::debug!("FIXTURE_ENDPOINT env override applied");
            self.api.endpoint = endpoint;
        }
        if let Some(timeout) = lookup("FIXTURE_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
            self.api.timeout_ms = timeout;
        }
        if let Some(retries) = lookup("FIXTURE_RETRIES").and_then(|v| v.parse().ok()) {
            self.api.retries = retries;
        }
        if let Some(delay) = lookup("FIXTURE_RETRY_DELAY_MS").and_then(|v| v.parse().ok()) {
            self.api.retry_delay_ms = delay;
        }
        if let Some(level) = lookup("RUST_LOG").filter(|v| !v.trim().is_empty()) {
            self.logging.level = level;
        }
    }

    /// Validate the configuration, clamping soft limits in place
    pub fn validate(&mut self) -> Result<()> {
        let endpoint = self.api.endpoint.trim();
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(FixtureError::Config {
                message: format!(
                    "Endpoint '{}' must start with http:// or https://",
                    self.api.endpoint
                ),
            });
        }
        if self.api.timeout_ms == 0 {
            return Err(FixtureError::Config {
                message: "timeout_ms must be > 0".to_string(),
            });
        }
        if self.api.retries > MAX_RETRIES {
            tracing::warn!(
                "retries {} exceeds max {}, clamping",
                self.api.retries,
                MAX_RETRIES
            );
            self.api.retries = MAX_RETRIES;
        }
        if self.api.retry_delay_ms > MAX_RETRY_DELAY_MS {
            tracing::warn!(
                "retry_delay_ms {} exceeds max {}, clamping",
                self.api.retry_delay_ms,
                MAX_RETRY_DELAY_MS
            );
            self.api.retry_delay_ms = MAX_RETRY_DELAY_MS;
        }
        Ok(())
    }
}
