//! Command implementations for splitmerge CLI

pub mod list;
pub mod merge;

use std::path::Path;

use crate::bundle::DirectoryBundleProvider;
use crate::config::Config;
use crate::error::Result;

/// Provider configured from `--config`, the user config file, or defaults
fn configured_provider(config_path: Option<&Path>) -> Result<DirectoryBundleProvider> {
    let config = Config::load(config_path)?;
    Ok(DirectoryBundleProvider::new(config))
}
