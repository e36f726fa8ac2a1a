//! tdvala CLI - TDLib schema to Vala client generator
//!
//! Commands:
//! - `tdvala generate` - Generate the Vala client tree from a schema
//! - `tdvala check` - Validate a tdvala.toml project and its schema
//! - `tdvala inspect` - Print what a schema declares

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tdvala_core::LogLevel;

mod generate;
mod inspect;
mod logging;
mod project;

#[derive(Parser)]
#[command(name = "tdvala")]
#[command(author, version, about = "Generate typed Vala clients from the TDLib schema", long_about = None)]
struct Cli {
    /// Log verbosity (trace, debug, info, warn, error, off); RUST_LOG wins when set
    #[arg(long, global = true, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the client library sources
    Generate {
        /// Path to tdvala.toml (default: ./tdvala.toml when present)
        #[arg(short, long)]
        project: Option<PathBuf>,

        /// Schema file (overrides [paths] schema)
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Output root directory (overrides [paths] output)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory of static support files copied into the output root
        #[arg(long)]
        support: Option<PathBuf>,

        /// Vala namespace of the generated classes
        #[arg(short, long)]
        namespace: Option<String>,

        /// Copyright holder stamped into every file header
        #[arg(short, long)]
        author: Option<String>,

        /// Copyright year (default: current year)
        #[arg(long)]
        year: Option<i32>,
    },

    /// Validate a tdvala.toml project and parse its schema
    Check {
        /// Path to tdvala.toml (default: ./tdvala.toml)
        #[arg(short, long)]
        project: Option<PathBuf>,
    },

    /// Parse a schema and print a summary of its model
    Inspect {
        /// Schema file
        schema: PathBuf,

        /// Print the whole model as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level);

    match cli.command {
        Commands::Generate {
            project: project_path,
            schema,
            output,
            support,
            namespace,
            author,
            year,
        } => {
            generate::run(
                project_path,
                project::Overrides {
                    schema,
                    output,
                    support,
                    namespace,
                    author,
                    year,
                },
            )?;
        }
        Commands::Check {
            project: project_path,
        } => {
            project::check(project_path)?;
        }
        Commands::Inspect { schema, json } => {
            inspect::run(&schema, json)?;
        }
    }

    Ok(())
}
