//! `svgrab.toml` configuration.
//!
//! # Example
//!
//! ```toml
//! [processing]
//! optimize = true
//! convert-colors = true
//! target-size = 64
//!
//! [naming]
//! fallback-prefix = "icon"
//! component-prefix = "Icon"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ProcessingOptions;
use crate::component::{DEFAULT_COMPONENT_PREFIX, component_name_with_prefix};
use crate::error::ConfigError;
use crate::naming::{DEFAULT_FILE_PREFIX, file_name_with_prefix};

/// Top-level configuration. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Options for single-file processing.
    pub processing: ProcessingOptions,
    pub naming: NamingConfig,
}

/// `[naming]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct NamingConfig {
    /// Prefix of file names for SVGs without a title or id.
    pub fallback_prefix: String,
    /// Prefix of generated component names.
    pub component_prefix: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            fallback_prefix: DEFAULT_FILE_PREFIX.to_string(),
            component_prefix: DEFAULT_COMPONENT_PREFIX.to_string(),
        }
    }
}

impl NamingConfig {
    pub fn file_name(&self, markup: &str, index: usize) -> String {
        file_name_with_prefix(markup, index, &self.fallback_prefix)
    }

    pub fn component_name(&self, index: usize) -> String {
        component_name_with_prefix(&self.component_prefix, index)
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
