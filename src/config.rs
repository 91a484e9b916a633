//! Configuration for the text-insight client.
//!
//! Precedence is env over TOML over defaults. The API credential is only ever
//! read from the environment.

use crate::credential::{Credential, is_placeholder};
use crate::error::{InsightError, Result};
use crate::transport::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};
use serde::{Deserialize, Serialize};
use std::path::Path;

const MIN_TIMEOUT_MS: u64 = 1_000;
const MAX_TIMEOUT_MS: u64 = 300_000;

/// Main configuration loaded from text_insight.toml and environment variables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
    /// Only ever sourced from the environment
    #[serde(skip)]
    pub credential: Option<Credential>,
}

/// Remote API endpoint settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
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
            level: "text_insight=info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file and environment variables.
    /// Uses INSIGHT_CONFIG or defaults to "text_insight.toml".
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Like [`Config::load`], but an explicit `path` takes precedence over INSIGHT_CONFIG.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        // INSIGHT_ENV_FILE if set, else ./.env when present
        if let Ok(env_path) = std::env::var("INSIGHT_ENV_FILE") {
            let _ = dotenvy::from_path(env_path);
        } else {
            let _ = dotenvy::dotenv();
        }
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Resolve the config file, apply env overrides and validate, reading the
    /// environment only through `lookup`.
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| InsightError::Config {
                    message: format!("cannot read {}: {}", path.display(), e),
                })?;
                Self::from_toml_str(&content)?
            }
            None => {
                let config_path =
                    lookup("INSIGHT_CONFIG").unwrap_or_else(|| "text_insight.toml".to_string());
                match std::fs::read_to_string(&config_path) {
                    Ok(content) => Self::from_toml_str(&content)?,
                    Err(_) => {
                        tracing::warn!("Config file {} not found, using defaults", config_path);
                        Self::default()
                    }
                }
            }
        };

        config.apply_env(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML without touching the environment.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment overrides through `lookup` so callers can supply a fake environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("INSIGHT_BASE_URL") {
            self.api.base_url = url;
            tracing::debug!("INSIGHT_BASE_URL env override applied");
        }
        if let Some(raw) = lookup("INSIGHT_TIMEOUT_MS") {
            self.api.timeout_ms = raw.parse().map_err(|_| InsightError::Config {
                message: format!("INSIGHT_TIMEOUT_MS must be an integer, got '{}'", raw),
            })?;
        }
        if let Some(level) = lookup("RUST_LOG") {
            self.logging.level = level;
        }

        // INSIGHT_API_KEY wins; DEEPSEEK_API_KEY is accepted as a fallback
        let key = lookup("INSIGHT_API_KEY")
            .filter(|k| !is_placeholder(k))
            .or_else(|| lookup("DEEPSEEK_API_KEY").filter(|k| !is_placeholder(k)));
        if let Some(key) = key {
            self.credential = Some(Credential::new(key)?);
        }
        Ok(())
    }

    /// Reject unusable URLs and clamp the timeout into a sane window.
    pub fn validate(&mut self) -> Result<()> {
        let url = &self.api.base_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(InsightError::Config {
                message: format!("base_url '{}' must start with http:// or https://", url),
            });
        }

        let clamped = self.api.timeout_ms.clamp(MIN_TIMEOUT_MS, MAX_TIMEOUT_MS);
        if clamped != self.api.timeout_ms {
            tracing::warn!(
                "timeout_ms {} outside [{}, {}], clamping to {}",
                self.api.timeout_ms,
                MIN_TIMEOUT_MS,
                MAX_TIMEOUT_MS,
                clamped
            );
            self.api.timeout_ms = clamped;
        }
        Ok(())
    }
}
