use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use dirs::home_dir;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    currency::is_known_currency,
    errors::StorageError,
    utils::fs::{ensure_dir, write_atomic},
};

const DEFAULT_DIR_NAME: &str = ".expense_core";
const CONFIG_FILE: &str = "config.json";
const DATA_FILE: &str = "expenses.json";
const DEFAULT_REPORT_CURRENCY: &str = "JOD";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

pub const DEFAULT_RATE_API_URL: &str = "https://v6.exchangerate-api.com/v6";
/// Environment variable holding the rate API credential. Never persisted.
pub const API_KEY_ENV: &str = "EXCHANGE_RATE_API_KEY";
pub const HOME_ENV: &str = "EXPENSE_CORE_HOME";

/// Returns the application data directory, defaulting to `~/.expense_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateApiConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl RateApiConfig {
    /// Request timeout; a zero setting falls back to the default.
    pub fn timeout(&self) -> Duration {
        if self.timeout_ms == 0 {
            Duration::from_millis(DEFAULT_TIMEOUT_MS)
        } else {
            Duration::from_millis(self.timeout_ms)
        }
    }
}

impl Default for RateApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_RATE_API_URL.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub report_currency: String,
    #[serde(default)]
    pub rate_api: RateApiConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            report_currency: DEFAULT_REPORT_CURRENCY.into(),
            rate_api: RateApiConfig::default(),
            data_file: None,
        }
    }
}

impl Config {
    /// Where expense snapshots live: the configured file (relative paths are
    /// taken from `base`), or `expenses.json` inside `base`.
    pub fn data_file_in(&self, base: &Path) -> PathBuf {
        match &self.data_file {
            Some(file) => base.join(file),
            None => base.join(DATA_FILE),
        }
    }

    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !is_known_currency(&self.report_currency) {
            warnings.push(format!(
                "report currency `{}` is not a known currency code",
                self.report_currency
            ));
        }
        if self.rate_api.timeout_ms == 0 {
            warnings.push(format!(
                "rate API timeout of 0 ms replaced by {} ms",
                DEFAULT_TIMEOUT_MS
            ));
        }
        warnings
    }
}

/// Loads and stores `config.json` under the application directory.
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, StorageError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, StorageError> {
        ensure_dir(&base)?;
        let path = base.join(CONFIG_FILE);
        Ok(Self { base, path })
    }

    /// Reads the config file, falling back to defaults when none exists.
    pub fn load(&self) -> Result<Config, StorageError> {
        let config = if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data)?
        } else {
            Config::default()
        };
        for warning in config.warnings() {
            warn!(path = %self.path.display(), "{}", warning);
        }
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    pub fn data_file(&self, config: &Config) -> PathBuf {
        config.data_file_in(&self.base)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
