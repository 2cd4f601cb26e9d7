//! Service configuration
//!
//! Settings come from an optional TOML file, then environment variables
//! (`APP_DEBUG`, `APP_LOG_LEVEL`, `APP_LOG_FORMAT`) override individual keys. Missing file, sections, or keys fall back to
//! defaults.

use crate::error::AnalysisError;
use crate::logging::{LogConfig, LogFormat, LogLevel};
use crate::thresholds::validate_priors;
use crate::types::GlobalPriors;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub app: AppSettings,
    pub priors: GlobalPriors,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub debug: bool,
    pub log_level: LogLevel,
    pub log_format: LogFormat,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            debug: false,
            log_level: LogLevel::Info,
            log_format: LogFormat::Pretty,
        }
    }
}

impl ServiceConfig {
    /// Load from a file (if it exists) and apply process environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, AnalysisError> {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::load_with_env(path, &env)
    }

    /// Load with an explicit environment map
    pub fn load_with_env(
        path: Option<&Path>,
        env: &HashMap<String, String>,
    ) -> Result<Self, AnalysisError> {
        let mut config = match path {
            Some(p) if p.exists() => Self::from_toml(&fs::read_to_string(p)?)?,
            _ => Self::default(),
        };
        config.apply_env(env)?;
        validate_priors(&config.priors)?;
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self, AnalysisError> {
        toml::from_str(text).map_err(|e| AnalysisError::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String, AnalysisError> {
        toml::to_string_pretty(self).map_err(|e| AnalysisError::Config(e.to_string()))
    }

    /// Override keys from `APP_*` variables
    pub fn apply_env(&mut self, env: &HashMap<String, String>) -> Result<(), AnalysisError> {
        if let Some(debug) = env.get("APP_DEBUG") {
            self.app.debug = parse_bool(debug)
                .ok_or_else(|| AnalysisError::Config(format!("APP_DEBUG is not a boolean: {}", debug)))?;
        }
        if let Some(level) = env.get("APP_LOG_LEVEL") {
            self.app.log_level = level.parse().map_err(AnalysisError::Config)?;
        }
        if let Some(format) = env.get("APP_LOG_FORMAT") {
            self.app.log_format = format.parse().map_err(AnalysisError::Config)?;
        }
        Ok(())
    }

    /// Logging settings derived from the app section
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            level: if self.app.debug {
                LogLevel::Debug
            } else {
                self.app.log_level
            },
            format: self.app.log_format,
            ..LogConfig::default()
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
