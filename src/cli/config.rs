use std::path::{Path, PathBuf};
use log::debug;
use serde::{Serialize, Deserialize};

use crate::error::{ReadError, Result};
use crate::input::OverflowPolicy;

pub const CONFIG_PATH: &str = "~/.config/prompted-line/config.yaml";
pub const CAPACITY_ENV: &str = "PROMPTED_LINE_CAPACITY";
pub const DEFAULT_CAPACITY: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Size of the scratch buffer; one slot is kept for the terminator.
    pub capacity: usize,
    pub overflow: OverflowPolicy,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            overflow: OverflowPolicy::default(),
        }
    }
}

impl ReaderConfig {
    pub fn new(capacity: usize, overflow: OverflowPolicy) -> Result<Self> {
        let config = Self { capacity, overflow };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(ReadError::InvalidCapacity(self.capacity));
        }
        Ok(())
    }
}

pub fn config_path() -> PathBuf {
    shellexpand::tilde(CONFIG_PATH).into_owned().into()
}

pub fn read_config(path: &Path) -> Result<ReaderConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ReaderConfig = serde_yaml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

pub fn write_config(path: &Path, config: &ReaderConfig) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Loads an explicit config file, or the default one if it exists.
/// A missing default file yields the built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<ReaderConfig> {
    if let Some(path) = path {
        return read_config(path);
    }

    let default_path = config_path();
    if !default_path.is_file() {
        debug!("no config at {}, using defaults", default_path.display());
        return Ok(ReaderConfig::default());
    }
    read_config(&default_path)
}
