//! Formwire CLI - run the validation wiring compiler on model files.
//!
//! ```bash
//! formwire plan sign_up.toml
//! formwire expand sign_up.toml --output src/sign_up_validation.rs
//! ```
//!
//! See `formwire --help` for all available commands and options.

mod commands;
mod logging;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "formwire",
    about = "Validation wiring compiler",
    version,
    after_help = "Model files describe one host type: its name, callbacks, actions and [[fields]]."
)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the validation unit for a model file
    Expand {
        /// TOML class model
        model: PathBuf,

        /// Emit the reflective variant for hosts without annotated fields
        #[arg(long)]
        data_binding: bool,

        /// Configuration file (defaults to ./formwire.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the generated source here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show which validators a model file resolves to
    Plan {
        /// TOML class model
        model: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Configuration file (defaults to ./formwire.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Expand { model, data_binding, config, output } => {
            commands::load_config(config.as_deref(), cli.verbose).and_then(|config| {
                commands::expand::run(&model, &config, data_binding, output.as_deref())
            })
        }
        Commands::Plan { model, json, config } => {
            commands::load_config(config.as_deref(), cli.verbose)
                .and_then(|config| commands::plan::run(&model, &config, json))
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
