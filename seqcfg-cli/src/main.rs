use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod elements;
mod error;

use config::{Config, OutputFormat};
use elements::Domain;
use error::CliError;

#[derive(Parser)]
#[command(name = "seqcfg")]
#[command(about = "seqcfg - validate composed configurations for sequence algorithms")]
#[command(version)]
#[command(long_about = "
seqcfg assembles configuration elements for alignment and search algorithms
left to right, rejecting duplicate and incompatible kinds.

Examples:
  seqcfg check elements.toml
  seqcfg check elements.toml --all-conflicts --format json
  seqcfg table --domain search
  seqcfg kinds --domain alignment
  seqcfg example --domain search > elements.toml
  seqcfg config --example --output seqcfg.toml
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Report format (overrides the configuration file)
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors; reports are still written to standard output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Assemble an element file and report the resulting configuration
    Check {
        /// Element file (TOML)
        file: PathBuf,

        /// List every conflict instead of stopping at the first one
        #[arg(long)]
        all_conflicts: bool,
    },

    /// Print the compatibility table of a domain
    Table {
        #[arg(long, value_enum)]
        domain: Domain,
    },

    /// List the element kinds of a domain
    Kinds {
        #[arg(long, value_enum)]
        domain: Domain,
    },

    /// Print a sample element file
    Example {
        #[arg(long, value_enum)]
        domain: Domain,
    },

    /// Show the active configuration
    Config {
        /// Print an example configuration file instead
        #[arg(long)]
        example: bool,

        /// Write to this file instead of standard output
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn setup_logging(verbose: u8, quiet: bool) -> Result<()> {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let format = cli.format.unwrap_or(config.general.output_format);

    match cli.command {
        Commands::Check {
            file,
            all_conflicts,
        } => commands::check::execute(&config, &file, all_conflicts, format),
        Commands::Table { domain } => commands::table::execute(domain, format),
        Commands::Kinds { domain } => commands::kinds::execute(domain, format),
        Commands::Example { domain } => commands::example::execute(domain),
        Commands::Config { example, output } => {
            commands::config::execute(&config, example, output.as_deref())
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet)?;

    if let Err(err) = run(cli) {
        if let Some(cli_err) = err.downcast_ref::<CliError>() {
            error::print_error_and_exit(cli_err);
        }
        return Err(err);
    }

    Ok(())
}
