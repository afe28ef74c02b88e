pub mod error;

pub use error::{ConfigError, ConfigResult};

use crate::console::VerbosityLevel;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// 5 MiB, applied to pasted images, picked files and fetched remote images alike.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

pub const API_URL_ENV: &str = "BLOGPASTE_API_URL";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GatewayConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Origin prefixed to relative URLs returned by the gateway.
    #[serde(default)]
    pub public_origin: Option<String>,
    #[serde(default = "default_upload_path")]
    pub upload_path: String,
    #[serde(default = "default_field_name")]
    pub field_name: String,
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_localize_html_images")]
    pub localize_html_images: bool,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_upload_path() -> String {
    "/api/upload".to_string()
}

fn default_field_name() -> String {
    "file".to_string()
}

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_localize_html_images() -> bool {
    true
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            public_origin: None,
            upload_path: default_upload_path(),
            field_name: default_field_name(),
            max_file_size: default_max_file_size(),
            timeout_secs: default_timeout_secs(),
            localize_html_images: default_localize_html_images(),
        }
    }
}

impl GatewayConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn upload_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.upload_path.starts_with('/') {
            format!("{}{}", base, self.upload_path)
        } else {
            format!("{}/{}", base, self.upload_path)
        }
    }

    pub fn public_origin(&self) -> &str {
        self.public_origin
            .as_deref()
            .unwrap_or(self.base_url.as_str())
            .trim_end_matches('/')
    }

    /// Turns a gateway-returned path into an absolute URL. Absolute URLs pass through.
    pub fn absolute_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            return url.to_string();
        }
        if url.starts_with('/') {
            format!("{}{}", self.public_origin(), url)
        } else {
            format!("{}/{}", self.public_origin(), url)
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub verbosity: Option<String>,
    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Reads the config at `path`, writing defaults there first if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            let content = fs::read_to_string(path).context("Failed to read config file")?;
            Self::from_toml(&content).context("Failed to parse config file")?
        } else {
            let config = Self::default();
            config.save_to(path)?;
            config
        };

        Ok(config)
    }

    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializationError(e.to_string()))?;
        fs::write(path, content).context("Failed to write config file")
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV)
            && !url.trim().is_empty()
        {
            self.gateway.base_url = url.trim().to_string();
        }
    }

    pub fn update_setting(&mut self, key: &str, value: String) -> ConfigResult<()> {
        let gateway = &mut self.gateway;
        match key {
            "verbosity" => {
                let level =
                    VerbosityLevel::parse(&value).ok_or_else(|| ConfigError::InvalidValue {
                        field: key.to_string(),
                        value: value.clone(),
                    })?;
                self.verbosity = Some(level.to_string());
            }
            "base_url" => gateway.base_url = value,
            "public_origin" => gateway.public_origin = Some(value),
            "upload_path" => gateway.upload_path = value,
            "field_name" => gateway.field_name = value,
            "max_file_size" => gateway.max_file_size = parse_value(key, &value)?,
            "timeout_secs" => gateway.timeout_secs = parse_value(key, &value)?,
            "localize_html_images" => gateway.localize_html_images = parse_value(key, &value)?,
            _ => {
                return Err(ConfigError::UnknownConfigKey {
                    key: key.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Get the configured verbosity level, falling back to Normal if not set
    pub fn get_verbosity(&self) -> VerbosityLevel {
        self.verbosity
            .as_deref()
            .and_then(VerbosityLevel::parse)
            .unwrap_or(VerbosityLevel::Normal)
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = Some(verbosity.to_string());
    }

    pub fn config_path() -> ConfigResult<PathBuf> {
        let path = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| ConfigError::NoHomeDirectory)?;
        let mut path = PathBuf::from(path);
        path.push(".config");
        path.push("blogpaste");
        path.push("config.toml");
        Ok(path)
    }
}

fn parse_value<T: std::str::FromStr>(field: &str, value: &str) -> ConfigResult<T> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
