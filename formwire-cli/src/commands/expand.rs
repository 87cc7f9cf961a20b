use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use formwire_compiler::config::FormwireConfig;

use super::read_model;

/// Compiles the model and writes the generated source.
pub fn run(
    model: &Path,
    config: &FormwireConfig,
    data_binding: bool,
    output: Option<&Path>,
) -> Result<()> {
    let source = generate(model, config, data_binding)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {}", parent.display()))?;
            }
            fs::write(path, &source)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => print!("{}", source),
    }

    Ok(())
}

fn generate(model: &Path, config: &FormwireConfig, data_binding: bool) -> Result<String> {
    let class = read_model(model)?;

    let mut options = config.codegen.options();
    if data_binding {
        options = options.with_data_binding(true);
    }

    let tokens = formwire_compiler::expand(&class, &options)
        .with_context(|| format!("Failed to compile `{}`", class.name))?;

    Ok(format!(
        "// Generated by formwire from {}. Do not edit.\n{}\n",
        model.display(),
        tokens
    ))
}
