// ========================================================================================
//
//                        THE STRATEGIC ORCHESTRATOR: EPICLOCK
//
// ========================================================================================
//
// This binary owns the application lifecycle from argument parsing to final output.
// Everything scientific lives in the library; everything operational lives here.

#![deny(dead_code)]
#![deny(unused_imports)]

use clap::{Parser, ValueEnum};
use epiclock::io::{example_panel, read_samples, write_estimates_tsv};
use epiclock::kernel::estimate_age_from_raw;
use epiclock::types::{AgeEstimate, ClockModel};
use serde::Serialize;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

// ========================================================================================
//                         COMMAND-LINE INTERFACE DEFINITION
// ========================================================================================

#[derive(Parser, Debug)]
#[clap(
    name = "epiclock",
    version,
    about = "An engine for epigenetic age estimation from DNA methylation data."
)]
struct Args {
    /// Path to a sample file: one comma-separated panel of 353 beta values per
    /// line. Reads stdin when omitted or set to '-'.
    #[clap(value_name = "SAMPLE_PATH")]
    input: Option<PathBuf>,

    /// Surrogate clock model to run.
    #[clap(long, value_enum, default_value_t = ClockModelCli::MeanSeeded)]
    model: ClockModelCli,

    /// Write results to this tab-separated file instead of stdout.
    #[clap(long, value_name = "OUT_PATH")]
    out: Option<PathBuf>,

    /// Emit results as JSON instead of the text report.
    #[clap(long)]
    json: bool,

    /// Estimate a generated example panel instead of reading input.
    #[clap(long)]
    demo: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ClockModelCli {
    MeanSeeded,
    KeySites,
}

impl From<ClockModelCli> for ClockModel {
    fn from(cli: ClockModelCli) -> Self {
        match cli {
            ClockModelCli::MeanSeeded => ClockModel::MeanSeeded,
            ClockModelCli::KeySites => ClockModel::KeySites,
        }
    }
}

/// One labelled result row for the JSON output mode.
#[derive(Serialize)]
struct SampleRecord<'a> {
    sample: &'a str,
    #[serde(flatten)]
    estimate: AgeEstimate,
}

// ========================================================================================
//                           THE MAIN ORCHESTRATION LOGIC
// ========================================================================================

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let model = ClockModel::from(args.model);

    // --- Phase 1: Sample ingestion ---
    let raw_samples = if args.demo {
        log::info!("Generating one example panel");
        vec![example_panel()]
    } else {
        read_input_samples(args.input.as_deref())?
    };
    if raw_samples.is_empty() {
        return Err("no samples found in input".into());
    }
    log::info!("Received {} sample(s)", raw_samples.len());

    // --- Phase 2: Validation and estimation ---
    let mut estimates: Vec<(String, AgeEstimate)> = Vec::with_capacity(raw_samples.len());
    for (index, values) in raw_samples.into_iter().enumerate() {
        let estimate = estimate_age_from_raw(model, values)?;
        log::info!(
            "Calculated epigenetic age for sample {}: {:.1} years ({model})",
            index + 1,
            estimate.age_years
        );
        estimates.push((format!("sample_{}", index + 1), estimate));
    }

    // --- Phase 3: Output ---
    match &args.out {
        Some(path) => {
            let file = File::create(path)?;
            let mut writer = BufWriter::new(file);
            if args.json {
                write_json(&mut writer, &estimates)?;
            } else {
                write_estimates_tsv(&mut writer, &estimates)?;
            }
            writer.flush()?;
            eprintln!(
                "> Wrote {} estimate(s) to {}",
                estimates.len(),
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            if args.json {
                write_json(&mut writer, &estimates)?;
            } else {
                for (sample, estimate) in &estimates {
                    writeln!(
                        writer,
                        "{sample}\t{:.1} years\t({})",
                        estimate.age_years, estimate.model
                    )?;
                }
            }
        }
    }
    Ok(())
}

// ========================================================================================
//                                  HELPER FUNCTIONS
// ========================================================================================

/// Resolves the input source and reads raw samples from it. A missing path or the
/// conventional '-' means stdin.
fn read_input_samples(input: Option<&Path>) -> Result<Vec<Vec<f64>>, Box<dyn Error + Send + Sync>> {
    match input {
        Some(path) if path.as_os_str() != "-" => {
            log::info!("Reading samples from {}", path.display());
            let file = File::open(path).map_err(|e| {
                format!("could not open sample file '{}': {e}", path.display())
            })?;
            Ok(read_samples(BufReader::new(file))?)
        }
        _ => {
            log::info!("Reading samples from stdin");
            let stdin = io::stdin();
            Ok(read_samples(stdin.lock())?)
        }
    }
}

/// Writes the labelled estimates as a pretty-printed JSON array.
fn write_json<W: Write>(
    writer: &mut W,
    estimates: &[(String, AgeEstimate)],
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let records: Vec<SampleRecord<'_>> = estimates
        .iter()
        .map(|(sample, estimate)| SampleRecord {
            sample,
            estimate: *estimate,
        })
        .collect();
    serde_json::to_writer_pretty(&mut *writer, &records)?;
    writeln!(writer)?;
    Ok(())
}
