//! Configuration file handling for splitmerge
//!
//! The configuration lives in a single YAML file:
//! - `--config <path>` or `SPLITMERGE_CONFIG` when given (must exist)
//! - otherwise `<config dir>/splitmerge/config.yaml` when present
//! - otherwise built-in defaults

pub mod merge_tool;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, config as config_error};

pub use merge_tool::MergeToolConfig;

const CONFIG_DIR_NAME: &str = "splitmerge";
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// External tool that performs the binary merge
    pub merge_tool: MergeToolConfig,

    /// Limits applied to captured merge tool output
    pub output: OutputConfig,
}

/// Limits applied to captured merge tool output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Number of trailing tool output lines kept for error reports
    pub max_lines: usize,

    /// Longer lines are truncated to this many characters
    pub max_line_length: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_lines: 400,
            max_line_length: 2000,
        }
    }
}

impl Config {
    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str, path: &Path) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| config_error::parse_failed(path.display().to_string(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when no file exists
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(config_error::not_found(path.display().to_string()));
            }
            return Self::read(path);
        }

        match default_config_path() {
            Some(path) if path.is_file() => Self::read(&path),
            _ => {
                tracing::debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        tracing::debug!("Loading configuration from {}", path.display());
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| config_error::read_failed(path.display().to_string(), e))?;
        Self::from_yaml(&yaml, path)
    }

    /// Reject configurations the merge step cannot work with
    pub fn validate(&self) -> Result<()> {
        self.merge_tool.validate()?;
        if self.output.max_lines == 0 {
            return Err(config_error::invalid("output.max_lines must be greater than 0"));
        }
        if self.output.max_line_length == 0 {
            return Err(config_error::invalid(
                "output.max_line_length must be greater than 0",
            ));
        }
        Ok(())
    }
}

/// Per-user configuration file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
