//! # Configuration
//!
//! grocer configuration is managed by [`confique`], which layers environment
//! variables over an optional TOML file over compiled defaults.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `GROCER_DEFAULT_MODE`, `GROCER_COLOR`, `GROCER_EXPORT_NAME`.
//! 2. **Config file**: `config.toml` in the data directory.
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key            | Default        | Description |
//! |----------------|----------------|-------------|
//! | `default_mode` | `none`         | Grouping used by `list` without `--by` (`none`, `store`, `category`) |
//! | `color`        | `true`         | Colored terminal output |
//! | `export_name`  | `grocery_list` | File stem for `export` (`grocery_list.json`, `grocery_list_backup.json`) |
//!
//! ## Data Directory
//!
//! [`data_dir`] picks where the list lives: an explicit override (the
//! `--data-dir` flag), else `GROCER_HOME`, else the OS data directory from the
//! `directories` crate.

use crate::error::{GrocerError, Result};
use crate::model::FilterMode;
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "config.toml";
pub const HOME_ENV: &str = "GROCER_HOME";

/// Configuration for grocer, stored in `config.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GrocerConfig {
    /// Grouping used by `list` when no `--by` flag is given.
    #[config(default = "none", env = "GROCER_DEFAULT_MODE")]
    pub default_mode: FilterMode,

    /// Colored output.
    #[config(default = true, env = "GROCER_COLOR")]
    pub color: bool,

    /// File stem used by `export`.
    #[config(default = "grocery_list", env = "GROCER_EXPORT_NAME")]
    pub export_name: String,
}

impl Default for GrocerConfig {
    fn default() -> Self {
        Self {
            default_mode: FilterMode::None,
            color: true,
            export_name: crate::codec::EXPORT_STEM.to_string(),
        }
    }
}

impl GrocerConfig {
    /// Load config for the given data directory. A missing file is fine.
    pub fn load(data_dir: &Path) -> Result<Self> {
        GrocerConfig::builder()
            .env()
            .file(data_dir.join(CONFIG_FILENAME))
            .load()
            .map_err(|e| GrocerError::Config(e.to_string()))
    }

    /// Key/value pairs for display.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("default_mode", self.default_mode.to_string()),
            ("color", self.color.to_string()),
            ("export_name", self.export_name.clone()),
        ]
    }
}

/// Resolve the data directory.
pub fn data_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "grocer", "grocer")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| GrocerError::Config("Could not determine a data directory".to_string()))
}
