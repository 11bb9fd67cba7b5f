//! Optional TOML configuration.
//!
//! Looked up at `--config <path>` or `<config dir>/pathstamp/config.toml`.
//! Every field is optional; a missing file means built-in defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::rules::MAX_FILE_SIZE;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory names pruned in addition to the built-in set
    pub extra_ignored_dirs: Vec<String>,
    /// Exact file names skipped in addition to the built-in set
    pub extra_ignored_files: Vec<String>,
    /// Extensions skipped in addition to the built-in set (`log` or `.log`)
    pub extra_ignored_extensions: Vec<String>,
    /// Size threshold in bytes; larger files are skipped
    pub max_file_size: u64,
    /// Honor `.stampignore` files found in the tree
    pub use_ignore_files: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extra_ignored_dirs: Vec::new(),
            extra_ignored_files: Vec::new(),
            extra_ignored_extensions: Vec::new(),
            max_file_size: MAX_FILE_SIZE,
            use_ignore_files: true,
        }
    }
}

impl Config {
    /// Default location of the user configuration file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pathstamp").join("config.toml"))
    }

    /// Load an explicit file, or the default file when it exists
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
