//! Configuration loading: TOML file, then environment, then CLI flags

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::import::{CatalogDefaults, DEFAULT_BATCH_SIZE};

/// Environment variable overriding `database.url`
pub const ENV_DATABASE_URL: &str = "SHOPIFY_IMPORT_DATABASE_URL";
/// Environment variable overriding `database.api_key`
pub const ENV_API_KEY: &str = "SHOPIFY_IMPORT_API_KEY";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub import: ImportConfig,
    pub catalog: CatalogDefaults,
}

/// Connection to the hosted database REST endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            timeout_secs: 30,
        }
    }
}

impl DatabaseConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// URL and key for a real run
    pub fn credentials(&self) -> Result<(&str, &str)> {
        let url = match self.url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url,
            _ => bail!(
                "No database URL configured. Set database.url in the config file or {}",
                ENV_DATABASE_URL
            ),
        };
        let key = match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => key,
            _ => bail!(
                "No API key configured. Set database.api_key in the config file or {}",
                ENV_API_KEY
            ),
        };
        Ok((url, key))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub batch_size: usize,
    pub products_table: String,
    pub catalog_table: String,
    /// TOML mapping file replacing the built-in Shopify mapping
    pub mapping_file: Option<PathBuf>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            products_table: "shopify_products".to_string(),
            catalog_table: "products".to_string(),
            mapping_file: None,
        }
    }
}

impl Config {
    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("shopify-import").join("config.toml"))
    }

    /// Parse config from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse config")
    }

    /// Load config from `path`, or from the default location when it exists.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => {
                if !p.exists() {
                    bail!("Config file does not exist: {}", p.display());
                }
                Some(p.to_path_buf())
            }
            None => Self::default_path().filter(|p| p.exists()),
        };

        let mut config = match path {
            Some(path) => {
                log::debug!("Loading config from {}", path.display());
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                Self::from_toml_str(&text)
                    .with_context(|| format!("Invalid config file: {}", path.display()))?
            }
            None => {
                log::debug!("No config file found, using defaults");
                Self::default()
            }
        };

        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                log::warn!("Failed to load .env file: {}", e);
            }
        }
        config.apply_env(|name| std::env::var(name).ok());

        Ok(config)
    }

    /// Apply environment overrides, read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_DATABASE_URL).filter(|v| !v.trim().is_empty()) {
            self.database.url = Some(url);
        }
        if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.trim().is_empty()) {
            self.database.api_key = Some(key);
        }
    }
}
