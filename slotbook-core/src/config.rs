//! Settings for the booking service connection.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, Map};
use serde::{Deserialize, Serialize};

use crate::error::{SlotbookError, SlotbookResult};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Settings at ~/.config/slotbook/config.toml, overridable through
/// `SLOTBOOK_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Base URL of the meeting booking service, without the `/v1/...` path.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout. Unset means the client waits as long as it takes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl Settings {
    pub fn config_path() -> SlotbookResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SlotbookError::Config("Could not determine config directory".into()))?
            .join("slotbook");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default config path, creating a commented-out file on
    /// first run.
    pub fn load() -> SlotbookResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> SlotbookResult<Self> {
        Self::load_with_env(path, None)
    }

    /// `env` replaces the process environment as the source of `SLOTBOOK_*`
    /// overrides when given.
    fn load_with_env(path: &Path, env: Option<Map<String, String>>) -> SlotbookResult<Self> {
        let settings: Settings = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("SLOTBOOK").try_parsing(true).source(env))
            .build()
            .map_err(|e| SlotbookError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| SlotbookError::Config(e.to_string()))?;

        tracing::debug!(base_url = %settings.base_url, "settings loaded");
        Ok(settings)
    }

    /// Full URL of the meeting endpoint.
    pub fn meeting_url(&self) -> String {
        format!("{}/v1/open/meeting", self.base_url.trim_end_matches('/'))
    }

    pub fn create_default_config(path: &Path) -> SlotbookResult<()> {
        let contents = format!(
            "\
# slotbook configuration

# Where the meeting booking service lives:
# base_url = \"{}\"

# Give up on a booking request after this many seconds (no limit by default):
# timeout_secs = 30
",
            DEFAULT_BASE_URL
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SlotbookError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| SlotbookError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn to_toml(&self) -> SlotbookResult<String> {
        toml::to_string_pretty(self).map_err(|e| SlotbookError::Config(e.to_string()))
    }
}
