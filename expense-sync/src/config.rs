//! # Config
//!
//! Runtime settings for the sync client, kept in a single YAML file.
//!
//! ## YAML Format
//!
//! ```yaml
//! api_base_url: "http://localhost:8080"
//! probe_timeout_secs: 5
//! data_directory: null
//! date_format: "%m/%d/%Y"
//! ```
//!
//! A missing file is created with defaults on first run. Missing keys in an
//! existing file fall back to their defaults. `EXPENSE_SYNC_API_URL` in the
//! environment replaces `api_base_url` after loading.

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::models::expense::DEFAULT_DATE_FORMAT;
use crate::storage::FileConnection;

pub const API_URL_ENV: &str = "EXPENSE_SYNC_API_URL";
pub const CONFIG_FILE_NAME: &str = "expense-sync.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Root of the ExpenseTracker service, without the `/ExpenseTracker` suffix
    pub api_base_url: String,
    pub probe_timeout_secs: u64,
    /// Where snapshots live; `None` means the platform data directory
    pub data_directory: Option<PathBuf>,
    /// chrono format for new expenses' dates
    pub date_format: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            probe_timeout_secs: 5,
            data_directory: None,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl SyncConfig {
    /// `<platform config dir>/ExpenseTracker/expense-sync.yaml`
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| anyhow!("Could not determine a config directory"))?;
        Ok(config_dir.join("ExpenseTracker").join(CONFIG_FILE_NAME))
    }

    /// Load config from `path`, writing defaults there if it doesn't exist
    pub fn load_or_create(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            let yaml_content = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            let config: SyncConfig = serde_yaml::from_str(&yaml_content)
                .with_context(|| format!("parsing config {}", path.display()))?;
            debug!("Loaded config from {}", path.display());
            config
        } else {
            let config = SyncConfig::default();
            config.save(path)?;
            info!("⚙️ Created default config at {}", path.display());
            config
        };

        config.validate()?;
        Ok(config)
    }

    /// Write the config atomically: temp file, then rename
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let yaml_content = serde_yaml::to_string(self)?;
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, path)?;

        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Apply `EXPENSE_SYNC_API_URL` if it is set and non-blank
    pub fn with_env_overrides(self) -> Self {
        let override_url = std::env::var(API_URL_ENV).ok();
        self.apply_api_url_override(override_url)
    }

    pub fn apply_api_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
            info!("⚙️ Using API URL from {}: {}", API_URL_ENV, url);
            self.api_base_url = url;
        }
        self
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    /// Open (creating if needed) the data directory for the file store
    pub fn open_connection(&self) -> Result<FileConnection> {
        match &self.data_directory {
            Some(dir) => FileConnection::new(dir),
            None => FileConnection::new_default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(anyhow!(
                "api_base_url must start with http:// or https://, got '{}'",
                self.api_base_url
            ));
        }
        if self.probe_timeout_secs == 0 {
            return Err(anyhow!("probe_timeout_secs must be at least 1"));
        }
        if self.date_format.trim().is_empty() {
            return Err(anyhow!("date_format must not be empty"));
        }
        Ok(())
    }
}
