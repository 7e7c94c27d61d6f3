//! dealsheet: normalize, validate and render real-estate deal rows

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dealsheet::cli::CliError;
use dealsheet::cli::commands::{
    default_scaffold_path, normalize::handle_normalize, render::handle_render, row::handle_row,
    scaffold::handle_scaffold, validate::handle_validate,
};
use dealsheet::pipeline::PipelineConfig;
use dealsheet::schema::SchemaKind;

#[derive(Parser)]
#[command(name = "dealsheet")]
#[command(about = "Normalize and render real-estate deal rows for the deal sheets")]
#[command(version)]
struct Cli {
    /// Log per-field normalization details
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Pipeline config file (defaults to ./dealsheet.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a TSV file and write it in schema column order
    Normalize {
        /// Sheet kind: inbound or transactions
        kind: SchemaKind,
        /// Input TSV file
        input: PathBuf,
        /// Output TSV file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Validate a TSV file against the schema
    Validate {
        /// Sheet kind: inbound or transactions
        kind: SchemaKind,
        /// Input TSV file
        input: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Normalize and render a TSV file as a paste-ready block
    Render {
        /// Sheet kind: inbound or transactions
        kind: SchemaKind,
        /// Input TSV file
        input: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Force the transaction layout of a country
        #[arg(long)]
        country: Option<String>,
    },
    /// Write an empty TSV with the schema header
    Scaffold {
        /// Sheet kind: inbound or transactions
        kind: SchemaKind,
        /// Output TSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Normalize and render JSON rows (one object or an array)
    Row {
        /// Sheet kind: inbound or transactions
        kind: SchemaKind,
        /// JSON file, or - for stdin
        #[arg(default_value = "-")]
        input: String,
        /// Force the transaction layout of a country
        #[arg(long)]
        country: Option<String>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();

    run(cli).map_err(|err| anyhow!(err.user_message()))
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = PipelineConfig::discover(cli.config.as_deref())?;

    match cli.command {
        Commands::Normalize {
            kind,
            input,
            output,
        } => handle_normalize(&config, kind, &input, &output, cli.verbose),
        Commands::Validate { kind, input, json } => handle_validate(&config, kind, &input, json),
        Commands::Render {
            kind,
            input,
            output,
            country,
        } => handle_render(
            &config,
            kind,
            &input,
            output.as_deref(),
            country.as_deref(),
            cli.verbose,
        ),
        Commands::Scaffold { kind, output } => {
            let output = output.unwrap_or_else(|| default_scaffold_path(kind));
            handle_scaffold(&config, kind, &output)
        }
        Commands::Row {
            kind,
            input,
            country,
            pretty,
        } => handle_row(&config, kind, &input, country.as_deref(), pretty),
    }
}
