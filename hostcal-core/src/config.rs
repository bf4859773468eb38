//! Global hostcal configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{HostcalError, HostcalResult};

static DEFAULT_BOOKINGS_FILE: &str = "~/.config/hostcal/bookings.toml";

/// User-Agent sent when downloading calendar feeds.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; CleaningApp/1.0)";

pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

fn default_bookings_file() -> PathBuf {
    PathBuf::from(DEFAULT_BOOKINGS_FILE)
}

fn default_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

/// Global configuration at ~/.config/hostcal/config.toml
///
/// Every key is optional. `HOSTCAL_*` environment variables override the
/// file, with `__` separating nested keys (`HOSTCAL_FETCH__TIMEOUT_SECS=30`).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HostcalConfig {
    #[serde(default = "default_bookings_file")]
    pub bookings_file: PathBuf,

    #[serde(default)]
    pub fetch: FetchConfig,
}

/// How remote calendar feeds are downloaded.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HostcalConfig {
    fn default() -> Self {
        HostcalConfig {
            bookings_file: default_bookings_file(),
            fetch: FetchConfig::default(),
        }
    }
}

impl HostcalConfig {
    pub fn config_path() -> HostcalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| HostcalError::Config("Could not determine config directory".into()))?
            .join("hostcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented template first if
    /// no config file exists yet.
    pub fn load() -> HostcalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> HostcalResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("HOSTCAL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| HostcalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| HostcalError::Config(e.to_string()))
    }

    /// Bookings file path with `~` expanded.
    pub fn bookings_path(&self) -> PathBuf {
        let full_path_str =
            shellexpand::tilde(&self.bookings_file.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> HostcalResult<()> {
        let contents = format!(
            "\
# hostcal configuration

# Where bookings are kept between runs:
# bookings_file = \"{DEFAULT_BOOKINGS_FILE}\"

[fetch]
# Seconds to wait for a calendar feed before giving up:
# timeout_secs = {DEFAULT_FETCH_TIMEOUT_SECS}

# User-Agent sent with feed requests:
# user_agent = \"{DEFAULT_USER_AGENT}\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                HostcalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| HostcalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
