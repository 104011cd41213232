//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};

use crate::ingest::{STATE_ERROR, STATE_WARNING};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Where log files are read from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Folder scanned for log files (not recursive)
    #[serde(default = "default_input_directory")]
    pub directory: String,
    /// File extension to pick up, matched case-insensitively
    #[serde(default = "default_extension")]
    pub extension: String,
}

pub fn default_input_directory() -> String {
    "./logs".to_string()
}

pub fn default_extension() -> String {
    "log".to_string()
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            directory: default_input_directory(),
            extension: default_extension(),
        }
    }
}

impl InputConfig {
    pub fn validate(&self) -> Result<(), String> {
        if crate::discovery::normalize_extension(&self.extension).is_empty() {
            return Err("input.extension must not be empty".to_string());
        }
        Ok(())
    }
}

/// Where result tables are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Folder for CSV and JSON results (created if missing)
    #[serde(default = "default_output_directory")]
    pub directory: String,
    /// Append a `_YYYYmmdd_HHMMSS` suffix to every output file name
    #[serde(default)]
    pub timestamped: bool,
    /// Also write `resumen.json`
    #[serde(default = "default_json")]
    pub json: bool,
}

pub fn default_output_directory() -> String {
    "resultados".to_string()
}

pub fn default_json() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            timestamped: false,
            json: default_json(),
        }
    }
}

/// How records are classified and processed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// State codes whose records are captured in full (ERR is always captured)
    #[serde(default = "default_states")]
    pub states: Vec<String>,
    /// Number of files processed in parallel (None = sequential)
    #[serde(default)]
    pub workers: Option<usize>,
}

pub fn default_states() -> Vec<String> {
    vec![STATE_ERROR.to_string(), STATE_WARNING.to_string()]
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            states: default_states(),
            workers: None,
        }
    }
}

impl AnalysisConfig {
    /// Validate configuration values.
    ///
    /// Returns `Ok(())` if all values are within acceptable bounds,
    /// or an error describing the first invalid value found.
    pub fn validate(&self) -> Result<(), String> {
        if self.states.is_empty() {
            return Err("analysis.states must list at least one state".to_string());
        }
        if self.states.iter().any(|s| s.trim().is_empty()) {
            return Err("analysis.states must not contain blank entries".to_string());
        }
        if let Some(0) = self.workers {
            return Err("analysis.workers must be > 0".to_string());
        }
        Ok(())
    }
}
