//! # Butterfly-transit CLI
//!
//! Reads a transit request document (JSON), answers its stat requests and
//! writes the responses as a JSON array.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};

use anyhow::{Context, Result};
use butterfly_transit::requests::{self, RequestDocument};
use butterfly_transit::{SettingsOverride, SolverStrategy};
use clap::Parser;
use log::error;

/// Command-line interface for butterfly-transit
#[derive(Parser)]
#[command(name = "butterfly-transit")]
#[command(about = "Transit catalogue and fastest-itinerary router")]
#[command(long_about = "Answers Bus, Stop and Route requests over a transit network:
  butterfly-transit requests.json              # Read a file, print responses
  butterfly-transit - < requests.json          # Read stdin
  butterfly-transit in.json -o out.json        # Write responses to a file

Routing Settings:
  Taken from the document's routing_settings, field by field overridable:
  --wait-time 6 --velocity 40                  # minutes, km/h
  --strategy eager                             # precompute all shortest paths")]
#[command(version = env!("BUTTERFLY_VERSION"))]
struct Cli {
    /// Request document path, or "-" for stdin
    #[arg(default_value = "-")]
    input: String,

    /// Output file path, or "-" for stdout
    #[arg(short, long, default_value = "-")]
    output: String,

    /// Minutes spent waiting at a stop before boarding
    #[arg(long)]
    wait_time: Option<f64>,

    /// Bus velocity in km/h
    #[arg(long)]
    velocity: Option<f64>,

    /// Shortest-path strategy
    #[arg(long, value_enum)]
    strategy: Option<SolverStrategy>,

    /// Pretty-print the response array
    #[arg(long)]
    pretty: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, PartialEq)]
enum InputSource {
    File(String),
    Stdin,
}

#[derive(Debug, PartialEq)]
enum OutputDestination {
    File(String),
    Stdout,
}

fn resolve_input(input: &str) -> InputSource {
    if input == "-" || input.is_empty() {
        InputSource::Stdin
    } else {
        InputSource::File(input.to_string())
    }
}

fn resolve_output(output: &str) -> OutputDestination {
    if output == "-" || output.is_empty() {
        OutputDestination::Stdout
    } else {
        OutputDestination::File(output.to_string())
    }
}

fn main() {
    if let Err(e) = run() {
        error!("{e:#}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();

    log::debug!("butterfly-transit v{} starting", env!("BUTTERFLY_VERSION"));

    let document = match resolve_input(&cli.input) {
        InputSource::Stdin => RequestDocument::from_reader(io::stdin().lock())
            .context("Failed to read request document from stdin")?,
        InputSource::File(path) => {
            let file = File::open(&path).with_context(|| format!("Failed to open {path}"))?;
            RequestDocument::from_reader(BufReader::new(file))
                .with_context(|| format!("Failed to read request document {path}"))?
        }
    };

    let overrides = SettingsOverride {
        bus_wait_time: cli.wait_time,
        bus_velocity: cli.velocity,
        strategy: cli.strategy,
    };
    let responses = requests::process(&document, &overrides)?;

    match resolve_output(&cli.output) {
        OutputDestination::Stdout => write_responses(io::stdout().lock(), &responses, cli.pretty)
            .context("Failed to write responses to stdout")?,
        OutputDestination::File(path) => {
            let file = File::create(&path).with_context(|| format!("Failed to create {path}"))?;
            write_responses(BufWriter::new(file), &responses, cli.pretty)
                .with_context(|| format!("Failed to write responses to {path}"))?;
        }
    }

    Ok(())
}

fn write_responses<W: Write>(
    mut writer: W,
    responses: &[requests::StatResponse],
    pretty: bool,
) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, responses)?;
    } else {
        serde_json::to_writer(&mut writer, responses)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
