use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Read, Write};
use tracing::{error, info};

use photo_classifier::logging::init_logging;
use photo_classifier::{build_plan, classify};

/// Output flavour for the renamed batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One renamed filename per line
    Text,
    /// Rename plan as pretty JSON
    Json,
    /// Rename plan as CSV
    Csv,
}

/// Rename photo records into per-city sequential names.
///
/// Reads records (`<file>.<ext>, <city>, <yyyy-MM-dd HH:mm:ss>`) from stdin
/// and writes the result to stdout.
#[derive(Parser, Debug)]
#[command(name = "photo-classifier", version, about)]
struct Args {
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() {
    init_logging();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        error!("{}", failure_message(&e));
        std::process::exit(1);
    }
}

/// Whole error chain on one line; the subscriber is the only stderr writer
fn failure_message(e: &anyhow::Error) -> String {
    format!("{:#}", e)
}

fn run(args: &Args) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read records from stdin")?;

    let output = render_output(&input, args.format)?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .context("Failed to write renamed photos to stdout")?;
    stdout.flush()?;

    Ok(())
}

fn render_output(input: &str, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let output = classify(input).context("Failed to classify photos")?;
            info!(photos = output.lines().count(), "renamed photos");
            Ok(output)
        }
        OutputFormat::Json | OutputFormat::Csv => {
            let plan = build_plan(input).context("Failed to classify photos")?;
            info!(photos = plan.len(), cities = plan.cities.len(), "built rename plan");
            if format == OutputFormat::Json {
                plan.to_json()
            } else {
                plan.to_csv()
            }
        }
    }
}
