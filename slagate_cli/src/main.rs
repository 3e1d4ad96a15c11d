mod commands;
mod ui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "slagate")]
#[command(about = "SLA gate for JMeter-style load test results", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a result log against SLA thresholds and write summary.json
    Check(commands::check::CheckArgs),

    /// Re-render an existing summary artifact
    Report {
        /// Path to a summary JSON file produced by `check`
        summary_file: PathBuf,

        /// Output format (cli, json, markdown)
        #[arg(short, long, default_value = "cli")]
        format: String,

        /// Output file path (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse a result log and show ingestion diagnostics without evaluating
    Validate {
        /// Path to the result file
        jtl_file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Check(args) => {
            let passed = commands::check::execute(args).await?;

            // The evaluation returns a typed verdict; only this adapter maps
            // it onto the process exit status the CI gate consumes.
            if !passed {
                std::process::exit(1);
            }
        }

        Commands::Report {
            summary_file,
            format,
            output,
        } => {
            commands::report::execute(summary_file, format, output).await?;
        }

        Commands::Validate { jtl_file } => {
            commands::validate::execute(jtl_file).await?;
        }
    }

    Ok(())
}
