//! Configuration management for pipelog

mod io;
mod types;

pub use types::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::ingest::StatesOfInterest;

impl Config {
    /// Get the config file path (~/.config/pipelog/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        io::config_path()
    }

    /// Get the config directory path (~/.config/pipelog)
    pub fn config_dir() -> Result<PathBuf> {
        io::config_dir()
    }

    /// Load configuration from the default location, or return defaults if not found
    pub fn load() -> Result<Self> {
        io::load()
    }

    /// Load configuration from an explicit file, or return defaults if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        io::load_from(path)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        io::save(self)
    }

    /// Save configuration to an explicit file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        io::save_to(self, path)
    }

    /// Input folder with ~ expanded
    pub fn input_directory(&self) -> PathBuf {
        expand_home(&self.input.directory)
    }

    /// Output folder with ~ expanded
    pub fn output_directory(&self) -> PathBuf {
        expand_home(&self.output.directory)
    }

    /// States whose records are captured in full
    pub fn states_of_interest(&self) -> StatesOfInterest {
        StatesOfInterest::new(self.analysis.states.iter().cloned())
    }

    /// Worker count for file processing (1 when unset)
    pub fn workers(&self) -> usize {
        self.analysis.workers.unwrap_or(1)
    }

    /// Validate all sections.
    pub fn validate(&self) -> Result<(), String> {
        self.input.validate()?;
        self.analysis.validate()
    }
}

fn expand_home(dir: &str) -> PathBuf {
    if let Some(stripped) = dir.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(dir)
}
