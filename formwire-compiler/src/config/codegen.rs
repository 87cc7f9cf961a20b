//! Code generation configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;

use crate::options::ProcessingOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
    /// Emit the reflective variant for hosts without annotated fields
    /// Env: FORMWIRE_DATA_BINDING
    /// Default: false
    pub data_binding: bool,

    /// Crate path generated code uses for runtime types
    /// Env: FORMWIRE_RUNTIME_CRATE
    /// Default: "formwire_core"
    pub runtime_crate: String,

    /// Suffix appended to the host name
    /// Env: FORMWIRE_UNIT_SUFFIX
    /// Default: "Validation"
    pub unit_suffix: String,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        let options = ProcessingOptions::default();
        Self {
            data_binding: options.data_binding,
            runtime_crate: options.runtime_crate,
            unit_suffix: options.unit_suffix,
        }
    }
}

/// Boolean environment flag. `None` for anything unrecognized.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl CodegenConfig {
    /// Merge another config into this one (other takes priority)
    pub fn merge(&mut self, other: Self) {
        self.data_binding = other.data_binding;
        self.runtime_crate = other.runtime_crate;
        self.unit_suffix = other.unit_suffix;
    }

    pub fn apply_env_vars(&mut self) {
        if let Ok(enabled) = env::var("FORMWIRE_DATA_BINDING") {
            match parse_flag(&enabled) {
                Some(enabled) => self.data_binding = enabled,
                None => log::warn!(
                    "ignoring FORMWIRE_DATA_BINDING={:?}, expected a boolean such as true or 0",
                    enabled
                ),
            }
        }

        if let Ok(runtime_crate) = env::var("FORMWIRE_RUNTIME_CRATE") {
            self.runtime_crate = runtime_crate;
        }

        if let Ok(suffix) = env::var("FORMWIRE_UNIT_SUFFIX") {
            self.unit_suffix = suffix;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.unit_suffix.trim().is_empty() {
            bail!("codegen.unit_suffix must not be empty");
        }
        if syn::parse_str::<syn::Path>(&self.runtime_crate).is_err() {
            bail!("codegen.runtime_crate '{}' is not a valid path", self.runtime_crate);
        }
        Ok(())
    }

    /// Options handed to the compiler.
    pub fn options(&self) -> ProcessingOptions {
        ProcessingOptions {
            data_binding: self.data_binding,
            runtime_crate: self.runtime_crate.clone(),
            unit_suffix: self.unit_suffix.clone(),
        }
    }
}
