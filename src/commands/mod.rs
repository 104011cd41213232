//! Command handlers for the pipelog CLI.
//!
//! Each submodule handles a specific CLI command or command group.
//! The main dispatch logic remains in main.rs.

pub mod analyze;
pub mod completions;
pub mod config;

use anyhow::Result;
use std::path::{Path, PathBuf};

use pipelog::Config;

/// Config file in effect: `--config` if given, else the default location.
pub fn config_file(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::config_path(),
    }
}

/// Load the config file in effect, falling back to defaults if it is missing.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    Config::load_from(&config_file(path)?)
}
