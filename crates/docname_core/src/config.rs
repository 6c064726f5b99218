//! Configuration types for docname.
//!
//! [`Config`] holds the few knobs hosts may want to turn: the deadline for
//! store calls, the timestamp format of the status text and where the
//! document listing lives. Configuration is persisted as TOML (typically at
//! `~/.config/docname/config.toml` on Unix systems).
//!
//! # Example
//!
//! ```ignore
//! use docname_core::config::Config;
//!
//! let config = Config::from_toml_str("store_timeout_ms = 5000")?;
//! let timeout = config.store_timeout();
//! ```

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[cfg(not(target_arch = "wasm32"))]
use crate::error::DocnameError;
use crate::error::Result;
use crate::status::DEFAULT_TIMESTAMP_FORMAT;
use crate::store::listing_url;

fn default_timestamp_format() -> String {
    DEFAULT_TIMESTAMP_FORMAT.to_string()
}

fn default_base_project_url() -> String {
    "/".to_string()
}

fn default_listing_path() -> String {
    "notebooks".to_string()
}

/// User and host settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Deadline for each store call in milliseconds. No deadline if unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_timeout_ms: Option<u64>,

    /// chrono format string for the "Last saved" timestamp
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// Base URL of the project on the document server
    #[serde(default = "default_base_project_url")]
    pub base_project_url: String,

    /// Path of the listing endpoint, relative to `base_project_url`
    #[serde(default = "default_listing_path")]
    pub listing_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_timeout_ms: None,
            timestamp_format: default_timestamp_format(),
            base_project_url: default_base_project_url(),
            listing_path: default_listing_path(),
        }
    }
}

impl Config {
    /// Deadline for store calls, if one is configured.
    pub fn store_timeout(&self) -> Option<Duration> {
        self.store_timeout_ms.map(Duration::from_millis)
    }

    /// Full URL of the document listing endpoint.
    pub fn listing_url(&self) -> String {
        listing_url(&self.base_project_url, &self.listing_path)
    }

    /// Parse a config from TOML text. Missing fields take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize the config to TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get the default config file path
    #[cfg(not(target_arch = "wasm32"))]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("docname").join("config.toml"))
    }

    /// Load the config from the default location, falling back to defaults
    /// when the file does not exist.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self> {
        let path = Self::config_path().ok_or(DocnameError::NoConfigDir)?;
        Self::load_from(path)
    }

    /// Load the config from `path`, falling back to defaults when the file
    /// does not exist.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {:?}, using defaults", path);
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Save the config to the default location
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().ok_or(DocnameError::NoConfigDir)?;
        self.save_to(path)
    }

    /// Save the config to `path`, creating parent directories as needed.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.to_toml_string()?)?;
        Ok(())
    }
}
