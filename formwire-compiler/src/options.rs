//! Build-time processing options

/// Options that influence emission for every host type of a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingOptions {
    /// Two-way data binding is available; enables the reflective variant.
    pub data_binding: bool,
    /// Crate the generated code refers to for its runtime types.
    pub runtime_crate: String,
    /// Appended to the host name to name the generated unit.
    pub unit_suffix: String,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            data_binding: false,
            runtime_crate: "formwire_core".to_string(),
            unit_suffix: "Validation".to_string(),
        }
    }
}

impl ProcessingOptions {
    pub fn with_data_binding(mut self, enabled: bool) -> Self {
        self.data_binding = enabled;
        self
    }

    pub fn with_runtime_crate(mut self, runtime_crate: impl Into<String>) -> Self {
        self.runtime_crate = runtime_crate.into();
        self
    }
}
