//! Configuration management
//!
//! Settings live in a TOML file under the user's config directory. Values
//! from the environment (or a `.env` file) override the file, and command
//! line flags override both.

pub mod models;

pub use models::{ApiConfig, Config, ImportConfig};

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

pub const ENV_API_URL: &str = "CRM_API_URL";
pub const ENV_API_TOKEN: &str = "CRM_API_TOKEN";

/// Keys accepted by `config set`
pub const SETTABLE_KEYS: &[&str] = &[
    "api.base_url",
    "api.token",
    "import.check_path",
    "import.confirm_path",
];

impl Config {
    /// Location of the config file
    pub fn path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Could not determine the user config directory")?;
        Ok(dir.join("crm-cli").join("config.toml"))
    }

    /// Load the config file (defaults when missing) and apply environment
    /// overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::path()?)?;
        config.apply_overrides(|key| dotenvy::var(key).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// practice). Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_API_URL) {
            log::debug!("Using API URL from {}", ENV_API_URL);
            self.api.base_url = url;
        }
        if let Some(token) = get(ENV_API_TOKEN) {
            log::debug!("Using API token from {}", ENV_API_TOKEN);
            self.api.token = Some(token);
        }
    }

    /// Set a single value by dotted key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "api.base_url" => {
                if !value.starts_with("http://") && !value.starts_with("https://") {
                    bail!("api.base_url must start with http:// or https://");
                }
                self.api.base_url = value.to_string();
            }
            "api.token" => {
                self.api.token = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            "import.check_path" => self.import.check_path = normalize_path(value),
            "import.confirm_path" => self.import.confirm_path = normalize_path(value),
            other => bail!(
                "Unknown config key '{}'. Valid keys: {}",
                other,
                SETTABLE_KEYS.join(", ")
            ),
        }
        Ok(())
    }
}

fn normalize_path(value: &str) -> String {
    if value.starts_with('/') {
        value.to_string()
    } else {
        format!("/{}", value)
    }
}
