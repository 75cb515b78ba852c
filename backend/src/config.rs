//! Runtime configuration: where the cache and the mirror live.

use anyhow::Result;
use log::info;
use std::path::PathBuf;

/// Application identifier; names the private data directory
pub const APP_IDENTIFIER: &str = "com.animalhospital.accounts";

/// Overrides the data directory
pub const DATA_DIR_ENV: &str = "ACCOUNT_MANAGER_DATA_DIR";

/// `0`, `false`, `off` or `no` turn the file mirror off
pub const MIRROR_ENV: &str = "ACCOUNT_MANAGER_MIRROR";

pub const DEFAULT_CACHE_FILE: &str = "local_storage.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Application-private directory holding the cache and `accounts.json`
    pub data_directory: PathBuf,
    pub cache_file_name: String,
    /// False for shells without a desktop bridge
    pub mirror_enabled: bool,
}

impl AppConfig {
    pub fn new(data_directory: PathBuf) -> Self {
        Self {
            data_directory,
            cache_file_name: DEFAULT_CACHE_FILE.to_string(),
            mirror_enabled: true,
        }
    }

    /// Resolve configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_vars(
            std::env::var(DATA_DIR_ENV).ok(),
            std::env::var(MIRROR_ENV).ok(),
        )
    }

    /// Resolve configuration from already-read variable values
    pub fn from_vars(data_dir: Option<String>, mirror: Option<String>) -> Result<Self> {
        let data_directory = match data_dir.filter(|dir| !dir.trim().is_empty()) {
            Some(dir) => {
                info!("Using data directory from {}: {}", DATA_DIR_ENV, dir);
                PathBuf::from(dir)
            }
            None => default_data_directory()?,
        };

        let mirror_enabled = match mirror {
            Some(value) => parse_flag(&value).unwrap_or(true),
            None => true,
        };

        Ok(Self {
            mirror_enabled,
            ..Self::new(data_directory)
        })
    }

    pub fn without_mirror(mut self) -> Self {
        self.mirror_enabled = false;
        self
    }

    pub fn cache_path(&self) -> PathBuf {
        self.data_directory.join(&self.cache_file_name)
    }
}

/// `<platform data dir>/<identifier>`, falling back to `$HOME/.<identifier>`
fn default_data_directory() -> Result<PathBuf> {
    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join(APP_IDENTIFIER));
    }

    let home_dir = dirs::home_dir()
        .or_else(|| std::env::var("HOME").ok().map(PathBuf::from))
        .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(format!(".{}", APP_IDENTIFIER)))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
