//! Configuration for command-line and build-script use of the compiler
//!
//! Values are resolved in the following order (highest priority wins):
//!
//! 1. **Environment Variables**
//! 2. **Config File** (formwire.toml)
//! 3. **Defaults**
//!
//! ```no_run
//! use formwire_compiler::config::FormwireConfig;
//!
//! let config = FormwireConfig::load()?;
//! let options = config.codegen.options();
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod codegen;
pub mod logging;

pub use codegen::CodegenConfig;
pub use logging::LoggingConfig;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "formwire.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormwireConfig {
    pub codegen: CodegenConfig,
    pub logging: LoggingConfig,
}

impl FormwireConfig {
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Defaults, then the file if it exists, then environment variables.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mut config = Self::default();

        if path.exists() {
            let file_config = Self::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            config.merge(file_config);
        }

        config.apply_env_vars();

        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.as_ref().display()))
    }

    /// Merge another config into this one (other takes priority)
    pub fn merge(&mut self, other: Self) {
        self.codegen.merge(other.codegen);
        self.logging.merge(other.logging);
    }

    pub fn apply_env_vars(&mut self) {
        self.codegen.apply_env_vars();
        self.logging.apply_env_vars();
    }

    pub fn validate(&self) -> Result<()> {
        self.codegen.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
