use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use formwire_compiler::config::FormwireConfig;
use formwire_compiler::{Arg, ErrorMessageSource, Plan};

use super::read_model;

pub fn run(model: &Path, config: &FormwireConfig, json: bool) -> Result<()> {
    let class = read_model(model)?;
    let plan = formwire_compiler::plan(&class, &config.codegen.options())
        .with_context(|| format!("Failed to plan `{}`", class.name))?;

    let rendered = if json { serde_json::to_string_pretty(&plan)? } else { describe(&plan) };
    println!("{}", rendered);
    Ok(())
}

fn message(source: &ErrorMessageSource) -> String {
    match source {
        ErrorMessageSource::Resource(id) => format!("resource {}", id),
        ErrorMessageSource::Literal(text) => format!("{:?}", text),
    }
}

fn arg(arg: &Arg) -> String {
    match arg {
        Arg::Bool(value) => value.to_string(),
        Arg::Int(value) => value.to_string(),
        Arg::Str(value) => format!("{:?}", value),
        Arg::Message(source) => message(source),
    }
}

/// One line per validator, in evaluation order.
fn describe(plan: &Plan) -> String {
    let variant = serde_json::to_value(plan.variant)
        .ok()
        .and_then(|value| value.as_str().map(str::to_string))
        .unwrap_or_default();

    let mut out = format!("{} ({})", plan.unit, variant);
    if plan.descriptors.is_empty() {
        out.push_str("\n  no validators");
    }

    for (index, descriptor) in plan.descriptors.iter().enumerate() {
        let args: Vec<String> = descriptor.args.iter().map(arg).collect();
        let _ = write!(
            out,
            "\n  {}. {} [{}] message: {}",
            index + 1,
            descriptor.kind.type_name(),
            descriptor.targets.join(", "),
            message(&descriptor.message),
        );
        if !args.is_empty() {
            let _ = write!(out, " args: {}", args.join(", "));
        }
    }

    out
}
