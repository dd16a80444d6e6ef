//! Configuration for the Wi-Fi portal client.
//!
//! Values are layered with figment: built-in defaults, then the TOML file at
//! [`config_path`], then `PORTAL_`-prefixed environment variables. Command
//! line flags are applied on top by the binary.

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

use portal_core::PortalConfig;
use portal_core::config::{DEFAULT_PORTAL_URL, DEFAULT_TIMEOUT_SECS};

pub const ENV_PREFIX: &str = "PORTAL_";

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

// ── TOML config ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Portal backend base URL.
    pub url: String,

    /// Request timeout in seconds.
    pub timeout: u64,

    /// Custom `User-Agent` header.
    pub user_agent: Option<String>,

    /// Where the TUI writes its log.
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: DEFAULT_PORTAL_URL.into(),
            timeout: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            log_file: default_log_file(),
        }
    }
}

fn default_log_file() -> PathBuf {
    std::env::temp_dir().join("wifi-portal.log")
}

impl Config {
    /// Validate and convert into the controller's settings.
    pub fn to_portal_config(&self) -> Result<PortalConfig, ConfigError> {
        let url: Url = self.url.parse().map_err(|e| ConfigError::Validation {
            field: "url".into(),
            reason: format!("{e}: {}", self.url),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation {
                field: "url".into(),
                reason: format!("expected an http or https URL, got '{}'", self.url),
            });
        }
        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least one second".into(),
            });
        }

        let mut config = PortalConfig::new(url);
        config.timeout = Duration::from_secs(self.timeout);
        config.user_agent.clone_from(&self.user_agent);
        Ok(config)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "wifi-portal", "wifi-portal").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("wifi-portal");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load from the canonical path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file + environment. A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()?;
    Ok(config)
}

/// Write `cfg` as TOML to `path`, creating parent directories.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(cfg)?)?;
    Ok(())
}
