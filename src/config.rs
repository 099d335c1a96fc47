//! User configuration in ~/.gofish/config.toml.

use crate::core::constants::{AUTOSAVE_INTERVAL_SECONDS, REQUEST_TIMEOUT_MS};
use crate::fishing::data::DEFAULT_DIFFICULTY;
use crate::utils::persistence::data_path;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILE: &str = "config.toml";
pub const BACKEND_URL_ENV: &str = "GOFISH_BACKEND_URL";

/// Configuration for a game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server root; the REST routes live under `<backend_url>/api`
    pub backend_url: String,

    pub request_timeout_ms: u64,

    /// Play against the in-process backend only
    pub offline: bool,

    /// Offline play asks Open-Meteo for the weather; false keeps a fixed report
    pub live_weather: bool,

    pub autosave_interval_seconds: u64,

    /// `error`, `warn`, `info`, `debug` or `trace`
    pub log_level: String,

    /// Index into `DIFFICULTY_LEVELS` for new profiles
    pub difficulty: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8001".to_string(),
            request_timeout_ms: REQUEST_TIMEOUT_MS,
            offline: false,
            live_weather: true,
            autosave_interval_seconds: AUTOSAVE_INTERVAL_SECONDS,
            log_level: "info".to_string(),
            difficulty: DEFAULT_DIFFICULTY,
        }
    }
}

impl Config {
    /// Loads ~/.gofish/config.toml (defaults when absent) and applies the
    /// environment override.
    pub fn load() -> io::Result<Self> {
        let config = Self::load_from(&data_path(CONFIG_FILE)?)?;
        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    pub fn load_from(path: &Path) -> io::Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    pub fn from_toml_str(text: &str) -> io::Result<Self> {
        toml::from_str(text).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        let text =
            toml::to_string_pretty(self).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, text)
    }

    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(BACKEND_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.backend_url = url.trim().to_string();
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
