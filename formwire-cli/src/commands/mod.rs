pub mod expand;
pub mod plan;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use formwire_compiler::config::{FormwireConfig, DEFAULT_CONFIG_FILE};
use formwire_compiler::ClassModel;

use crate::logging;

/// Loads and validates the configuration, then installs the logger.
///
/// An explicit path must exist; the default file is optional.
pub fn load_config(path: Option<&Path>, verbose: bool) -> Result<FormwireConfig> {
    let config = match path {
        Some(path) => {
            let mut config = FormwireConfig::from_file(path)?;
            config.apply_env_vars();
            config
        }
        None => FormwireConfig::load_from(DEFAULT_CONFIG_FILE)?,
    };
    config.validate()?;

    logging::init_logging(&config.logging, verbose);
    Ok(config)
}

/// Reads a class model written as TOML.
pub fn read_model(path: &Path) -> Result<ClassModel> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read model file: {}", path.display()))?;

    let model: ClassModel = toml::from_str(&content)
        .with_context(|| format!("Failed to parse model file: {}", path.display()))?;

    log::debug!("loaded model `{}` with {} field(s)", model.name, model.fields.len());
    Ok(model)
}


#[cfg(test)]
mod tests {
    use super::fixtures::{write, SIGN_UP};
    use super::*;
    use formwire_compiler::RuleKind;

    #[test]
    fn test_read_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "sign_up.toml", SIGN_UP);

        let model = read_model(&path).unwrap();
        assert_eq!(model.name, "SignUpForm");
        assert_eq!(model.fields.len(), 3);
        assert_eq!(model.fields[2].kind(), RuleKind::ConfirmPassword);
        assert_eq!(model.fields[2].error_message_res, 42);
        assert_eq!(model.clear_action.as_deref(), Some("reset"));
    }

    #[test]
    fn test_read_model_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "broken.toml", "name = ");

        let err = read_model(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.toml"));
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("missing.toml")), false).is_err());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "formwire.toml", "[codegen]\nunit_suffix = \"\"\n");
        assert!(load_config(Some(&path), false).is_err());
    }
}
