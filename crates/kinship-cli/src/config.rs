//! Configuration management for Kinship CLI
//!
//! Stores API key, tenant profiles, and default settings in
//! ~/.config/kinship/config.toml. `KINSHIP_API_KEY` and `KINSHIP_BASE_URL`
//! (also read from a `.env` file) override the stored values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_DIR: &str = "kinship";
const CONFIG_FILE: &str = "config.toml";

const ENV_API_KEY: &str = "KINSHIP_API_KEY";
const ENV_BASE_URL: &str = "KINSHIP_BASE_URL";

/// Shortcut for a tenant scope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TenantProfile {
    #[serde(default)]
    pub scope: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// CLI Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the member endpoint; `{tenant}` is replaced by the scope
    #[serde(default = "default_stats_path")]
    pub stats_path: String,
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_tenant: Option<String>,
    #[serde(default)]
    pub tenants: BTreeMap<String, TenantProfile>,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_stats_path() -> String {
    "/api/{tenant}/family-tree/stats".to_string()
}

fn default_refresh_interval_secs() -> u64 {
    kinship::DEFAULT_REFRESH_INTERVAL.as_secs()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            stats_path: default_stats_path(),
            refresh_interval_secs: default_refresh_interval_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            export_dir: None,
            default_tenant: None,
            tenants: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from the default path, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load config from `path`, or the defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file")?;

        Ok(config)
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory {:?}", dir))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content).with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(ENV_API_KEY) {
            if !key.trim().is_empty() {
                tracing::debug!("Using API key from {}", ENV_API_KEY);
                self.api_key = Some(key);
            }
        }
        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            if !url.trim().is_empty() {
                tracing::debug!(base_url = %url, "Using base URL from {}", ENV_BASE_URL);
                self.base_url = url;
            }
        }
    }

    /// Set API key
    pub fn set_api_key(&mut self, key: String) {
        self.api_key = Some(key);
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Add a tenant profile
    pub fn add_tenant(&mut self, name: String, scope: String, display_name: Option<String>) {
        self.tenants.insert(
            name,
            TenantProfile {
                scope,
                name: display_name,
            },
        );
    }

    /// Remove a tenant profile, clearing the default if it pointed there
    pub fn remove_tenant(&mut self, name: &str) -> bool {
        let removed = self.tenants.remove(name).is_some();
        if removed && self.default_tenant.as_deref() == Some(name) {
            self.default_tenant = None;
        }
        removed
    }

    /// Set default tenant profile
    pub fn set_default_tenant(&mut self, name: String) -> bool {
        if self.tenants.contains_key(&name) {
            self.default_tenant = Some(name);
            true
        } else {
            false
        }
    }

    /// Resolve a tenant argument to a scope.
    ///
    /// A profile name maps to its scope; any other value is used as a raw
    /// scope. Without an argument the default profile is used.
    pub fn resolve_tenant(&self, tenant: Option<&str>) -> Option<String> {
        match tenant {
            Some(name) => Some(
                self.tenants
                    .get(name)
                    .map(|profile| profile.scope.clone())
                    .unwrap_or_else(|| name.to_string()),
            ),
            None => {
                let name = self.default_tenant.as_ref()?;
                self.tenants.get(name).map(|profile| profile.scope.clone())
            }
        }
    }
}
