//! Startup configuration: defaults, then `config.json` from the platform
//! config directory, then environment overrides.

use std::{
    env, fs, io,
    path::{Path, PathBuf},
    sync::OnceLock,
    time::Duration,
};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infra::price_data::EMBEDDED_SOURCE;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "HomeMatch";
const APP_NAME: &str = "HomeMatch";
const CONFIG_FILENAME: &str = "config.json";

pub const ENV_PRICE_DATA: &str = "HOMEMATCH_PRICE_DATA";
pub const ENV_LOG: &str = "HOMEMATCH_LOG";
pub const ENV_LISTINGS: &str = "HOMEMATCH_LISTINGS";

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for {key}: '{value}'")]
    InvalidEnv { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// URL or filesystem path of the wide state price CSV, or `embedded` for
    /// the table bundled into the binary.
    pub price_data: String,
    /// Number of mock listings generated per state.
    pub listing_count: usize,
    pub listing_seed: Option<u64>,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub cache_ttl_minutes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            price_data: EMBEDDED_SOURCE.to_string(),
            listing_count: 15,
            listing_seed: None,
            log_filter: "info".to_string(),
            cache_ttl_minutes: 60,
        }
    }
}

impl AppConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_minutes.saturating_mul(60))
    }

    /// Reads the config file if present. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(source) = lookup(ENV_PRICE_DATA).filter(|v| !v.trim().is_empty()) {
            self.price_data = source;
        }
        if let Some(filter) = lookup(ENV_LOG).filter(|v| !v.trim().is_empty()) {
            self.log_filter = filter;
        }
        if let Some(raw) = lookup(ENV_LISTINGS) {
            self.listing_count = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                key: ENV_LISTINGS,
                value: raw.clone(),
            })?;
        }
        Ok(self)
    }
}

pub fn config_file() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Loads the configuration. Problems are returned next to a usable config so
/// the caller can log them once logging is up.
pub fn load() -> (AppConfig, Vec<ConfigError>) {
    let mut problems = Vec::new();

    let base = match config_file() {
        Some(path) => AppConfig::from_file(&path).unwrap_or_else(|err| {
            problems.push(err);
            AppConfig::default()
        }),
        None => AppConfig::default(),
    };

    let config = match base.clone().apply_overrides(|key| env::var(key).ok()) {
        Ok(config) => config,
        Err(err) => {
            problems.push(err);
            base
        }
    };

    (config, problems)
}

pub fn install(config: AppConfig) -> &'static AppConfig {
    CONFIG.get_or_init(|| config)
}

pub fn current() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::default)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::from_file(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.listing_count, 15);
        assert_eq!(config.cache_ttl(), Duration::from_secs(3600));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "listing_count": 30, "listing_seed": 42 }"#).unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.listing_count, 30);
        assert_eq!(config.listing_seed, Some(42));
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(AppConfig::from_file(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn environment_overrides_file_values() {
        let config = AppConfig::default()
            .apply_overrides(env_of(&[
                (ENV_PRICE_DATA, "https://example.com/prices.csv"),
                (ENV_LOG, "homematch=debug"),
                (ENV_LISTINGS, "25"),
            ]))
            .unwrap();
        assert_eq!(config.price_data, "https://example.com/prices.csv");
        assert_eq!(config.log_filter, "homematch=debug");
        assert_eq!(config.listing_count, 25);
    }

    #[test]
    fn bad_listing_override_is_reported() {
        let err = AppConfig::default()
            .apply_overrides(env_of(&[(ENV_LISTINGS, "many")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { key: ENV_LISTINGS, .. }));
    }

    #[test]
    fn defaults_use_bundled_prices() {
        assert_eq!(AppConfig::default().price_data, EMBEDDED_SOURCE);
    }

    #[test]
    fn huge_ttl_saturates() {
        let config = AppConfig {
            cache_ttl_minutes: u64::MAX,
            ..AppConfig::default()
        };
        assert_eq!(config.cache_ttl(), Duration::from_secs(u64::MAX));
    }
}
