use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

use text_artifact_scanner::prelude::*;

/// Duplicate-length threshold for standalone runs
const STANDALONE_MIN_LENGTH: usize = 10;

#[derive(Parser)]
#[command(name = "text_artifact_scanner")]
#[command(about = "Find duplicated lines and conversion artifacts in a text document", long_about = None)]
struct Cli {
    /// Document text (multi-line, over 200 characters) or path to a UTF-8 file
    input: String,

    /// Minimum trimmed length of a line reported as duplicate
    #[arg(short, long, default_value_t = STANDALONE_MIN_LENGTH)]
    min_length: usize,

    /// Also write the structured result as JSON to this file
    #[arg(short, long)]
    json: Option<PathBuf>,

    /// Skip the human-readable summary
    #[arg(short, long)]
    quiet: bool,

    /// Verbose logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    info!(min_length = cli.min_length, "starting analysis");

    let outcome = if cli.quiet {
        analyze_file_or_text_to(&cli.input, cli.min_length, &mut io::sink())
    } else {
        analyze_file_or_text(&cli.input, cli.min_length)
    };

    if let Some(ref json_path) = cli.json {
        write_json_report(json_path, &outcome)?;
        if !cli.quiet {
            println!("JSON report saved to: {}", json_path.display());
        }
    } else if cli.quiet {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        serde_json::to_writer_pretty(&mut out, &outcome).context("Failed to write JSON to stdout")?;
        writeln!(out)?;
    }

    if let AnalysisOutcome::Error { ref error } = outcome {
        eprintln!("Error: {}", error);
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // RUST_LOG wins over --verbose
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
