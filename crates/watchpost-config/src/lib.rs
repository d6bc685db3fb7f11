//! Configuration for the watchpost dashboard.
//!
//! Layered loading (defaults → TOML file → `WATCHPOST_*` environment),
//! persistence back to TOML, and translation to
//! `watchpost_core::MonitorConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use watchpost_core::MonitorConfig;

/// Backend polled when nothing else is configured.
pub const DEFAULT_URL: &str = "http://127.0.0.1:8080";
/// Default refresh period in milliseconds.
pub const DEFAULT_INTERVAL_MS: u64 = 1000;
/// Prefix for environment overrides. Nested keys use `__`.
pub const ENV_PREFIX: &str = "WATCHPOST_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl ConfigError {
    fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default)]
    pub refresh: RefreshSettings,

    /// Where the TUI writes its log. Falls back to the CLI default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BackendSettings {
    /// Backend root URL (e.g., "http://10.0.0.5:8080").
    #[serde(default = "default_url")]
    pub url: String,

    /// Per-request timeout. Absent means no timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RefreshSettings {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

fn default_url() -> String {
    DEFAULT_URL.into()
}
fn default_interval_ms() -> u64 {
    DEFAULT_INTERVAL_MS
}

impl Config {
    /// Validate and build the runtime configuration for the monitor.
    pub fn to_monitor_config(&self) -> Result<MonitorConfig, ConfigError> {
        let url = Url::parse(&self.backend.url).map_err(|e| {
            ConfigError::validation("backend.url", format!("'{}': {e}", self.backend.url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::validation(
                "backend.url",
                format!("expected http or https, got '{}'", url.scheme()),
            ));
        }

        if self.refresh.interval_ms == 0 {
            return Err(ConfigError::validation(
                "refresh.interval_ms",
                "must be greater than zero",
            ));
        }

        let timeout = match self.backend.timeout_secs {
            Some(0) => {
                return Err(ConfigError::validation(
                    "backend.timeout_secs",
                    "must be greater than zero",
                ));
            }
            other => other.map(Duration::from_secs),
        };

        Ok(MonitorConfig::new(url)
            .with_refresh_interval(Duration::from_millis(self.refresh.interval_ms))
            .with_request_timeout(timeout))
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "watchpost", "watchpost").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("watchpost");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// The layered provider chain for a given file. A missing file is skipped.
pub fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load from an explicit file + environment.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = figment_for(path).extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`, creating parents.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_match_local_backend() {
        let cfg = Config::default();
        assert_eq!(cfg.backend.url, "http://127.0.0.1:8080");
        assert_eq!(cfg.refresh.interval_ms, 1000);
        assert_eq!(cfg.backend.timeout_secs, None);

        let monitor = cfg.to_monitor_config().unwrap();
        assert_eq!(monitor.refresh_interval, Duration::from_secs(1));
        assert_eq!(monitor.request_timeout, None);
        assert_eq!(monitor.base_url.as_str(), "http://127.0.0.1:8080/");
    }

    #[test]
    fn rejects_non_http_scheme() {
        let mut cfg = Config::default();
        cfg.backend.url = "ftp://example.com".into();
        let err = cfg.to_monitor_config().unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "backend.url"));
    }

    #[test]
    fn rejects_unparseable_url() {
        let mut cfg = Config::default();
        cfg.backend.url = "not a url".into();
        assert!(cfg.to_monitor_config().is_err());
    }

    #[test]
    fn rejects_zero_interval() {
        let mut cfg = Config::default();
        cfg.refresh.interval_ms = 0;
        let err = cfg.to_monitor_config().unwrap_err();
        assert!(err.to_string().contains("refresh.interval_ms"));
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut cfg = Config::default();
        cfg.backend.timeout_secs = Some(0);
        assert!(cfg.to_monitor_config().is_err());
    }

    #[test]
    fn timeout_carries_through() {
        let mut cfg = Config::default();
        cfg.backend.timeout_secs = Some(3);
        cfg.refresh.interval_ms = 250;
        let monitor = cfg.to_monitor_config().unwrap();
        assert_eq!(monitor.request_timeout, Some(Duration::from_secs(3)));
        assert_eq!(monitor.refresh_interval, Duration::from_millis(250));
    }

    #[test]
    fn config_path_ends_in_config_toml() {
        assert!(config_path().ends_with("config.toml"));
    }
}
