//! candlewick CLI - Streaming OHLC bar aggregation.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod display;

use display::{AggregationArgs, Format};

#[derive(Parser)]
#[command(name = "candlewick")]
#[command(about = "Aggregate price ticks into fixed-interval OHLC bars", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay recorded ticks (timestamp,price) and write the resulting bars
    Replay {
        /// Tick file; records are `timestamp,price`
        input: PathBuf,

        #[command(flatten)]
        aggregation: AggregationArgs,

        /// Output file path. Defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        /// Number of most recent bars to write (the current bar included)
        #[arg(short = 'n', long, default_value = "60")]
        count: usize,

        /// Write every completed/updated notification instead of the retained bars
        #[arg(long)]
        events: bool,

        /// Abort on the first rejected tick instead of skipping it
        #[arg(long)]
        strict: bool,
    },

    /// Aggregate live prices read from stdin, one per line, using the system clock
    Stream {
        #[command(flatten)]
        aggregation: AggregationArgs,

        /// Only print completed bars
        #[arg(long)]
        completed_only: bool,
    },

    /// List interval presets
    Intervals,
}

fn init_logging(verbose: u8, quiet: bool) {
    let default = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Replay {
            input,
            aggregation,
            output,
            format,
            count,
            events,
            strict,
        } => commands::replay::replay(
            &input,
            &aggregation,
            output.as_deref(),
            format,
            count,
            events,
            strict,
        ),
        Commands::Stream {
            aggregation,
            completed_only,
        } => commands::stream::stream(&aggregation, completed_only).await,
        Commands::Intervals => {
            commands::intervals::list_intervals();
            Ok(())
        }
    }
}
