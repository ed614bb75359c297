//! docgen - renders the project README from its template

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "docgen")]
#[command(version)]
#[command(about = "Render markdown templates with placeholders and numbered citations", long_about = None)]
struct Cli {
    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a template to markdown
    Render {
        /// Template file (defaults to the built-in README template)
        input: Option<PathBuf>,

        /// Write output to FILE (use '--output -' for stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// YAML configuration layered over the built-in defaults
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,

        /// Placeholder value (TOKEN=VALUE)
        #[arg(short = 'M', long = "placeholder", value_parser = config::parse_placeholder)]
        placeholders: Vec<(String, String)>,

        /// Fail without writing output if any citation warning is reported
        #[arg(long)]
        strict: bool,
    },

    /// List the citation numbering of a template
    Citations {
        /// Template file (defaults to the built-in README template)
        input: Option<PathBuf>,

        /// YAML configuration layered over the built-in defaults
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; diagnostics go to stderr so '-o -' output stays clean
    let default_filter = if cli.quiet {
        "docgen=warn,docgen_refs=warn"
    } else {
        "docgen=info,docgen_refs=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .init();

    match cli.command {
        Commands::Render {
            input,
            output,
            config,
            placeholders,
            strict,
        } => commands::render::execute(commands::render::RenderArgs {
            input,
            output,
            config,
            placeholders,
            strict,
        }),
        Commands::Citations {
            input,
            config,
            json,
        } => commands::citations::execute(commands::citations::CitationsArgs {
            input,
            config,
            json,
        }),
    }
}
