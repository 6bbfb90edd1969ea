//! cdpgen CLI - Protocol client generator
//!
//! Commands:
//! - `cdpgen generate` - Generate a typed client from protocol schemas
//! - `cdpgen check` - Load and emit in memory without writing anything

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod check;
mod generate;

#[derive(Parser)]
#[command(name = "cdpgen")]
#[command(author, version, about = "Client generator for DevTools-style protocols", long_about = None)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate the client from protocol schemas
    Generate {
        /// Path to cdpgen.toml
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Schema document (repeatable, merged in order)
        #[arg(short, long = "schema")]
        schemas: Vec<PathBuf>,

        /// Output directory for generated code
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path of the runtime crate as seen from generated code
        #[arg(long)]
        runtime_crate: Option<String>,

        /// Write generated files without pretty-printing
        #[arg(long)]
        no_format: bool,
    },

    /// Validate schemas by generating in memory
    Check {
        /// Schema document (repeatable, merged in order)
        #[arg(short, long = "schema")]
        schemas: Vec<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            config,
            schemas,
            output,
            runtime_crate,
            no_format,
        } => {
            let options = generate::Options {
                config,
                schemas,
                output,
                runtime_crate,
                no_format,
            };
            generate::run(&options)?;
        }
        Commands::Check { schemas } => {
            check::run(&schemas)?;
        }
    }

    Ok(())
}
