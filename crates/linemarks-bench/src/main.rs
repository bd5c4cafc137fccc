//! linemarks-bench: CLI tool for running the line sampler on polyline files.
//!
//! Samples a polyline read from a JSON file with configurable spacing and
//! options, printing diagnostics for each run. Useful for:
//!
//! - Choosing a symbol spacing for a given line density
//! - Checking how an extent trims the samples of a long feature
//! - Measuring sampler cost on large polylines
//!
//! The input file holds a JSON array of `{"x": .., "y": ..}` points.
//! Set `RUST_LOG=debug` to see the sampler's own log output.
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin linemarks-bench -- [OPTIONS] --spacing <SPACING> <POLYLINE_PATH>
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use linemarks_sampler::diagnostics::duration_ms;
use linemarks_sampler::{Extent, Point, Polyline, SampleConfig, SampleDiagnostics, WebClock};

/// Line sampler experimentation and diagnostics for linemarks.
///
/// Samples a polyline at evenly-spaced intervals and prints per-run
/// timing and count diagnostics.
#[derive(Parser)]
#[command(name = "linemarks-bench", version)]
struct Cli {
    /// Path to the input polyline (JSON array of points).
    polyline_path: PathBuf,

    /// Target distance between samples along the line.
    #[arg(long)]
    spacing: f64,

    /// Compute bearings with the Y axis pointing down.
    #[arg(long)]
    invert_y: bool,

    /// Sample segment centres instead of segment boundaries.
    #[arg(long)]
    mid_points: bool,

    /// Keep only samples inside this box: `MINX,MINY,MAXX,MAXY`.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    extent: Option<Vec<f64>>,

    /// Full sampler config as a JSON string.
    ///
    /// When provided, `--invert-y`, `--mid-points` and `--extent` are
    /// ignored. The JSON must be a valid `SampleConfig` serialization.
    #[arg(long)]
    config_json: Option<String>,

    /// Write the samples of the first run to this file as JSON.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Number of runs for averaging.
    #[arg(long, default_value_t = 1, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    runs: usize,

    /// Output diagnostics as JSON instead of human-readable report.
    #[arg(long)]
    json: bool,
}

/// Build a [`SampleConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and the
/// individual option flags are ignored.
fn config_from_cli(cli: &Cli) -> Result<SampleConfig, String> {
    if let Some(ref json) = cli.config_json {
        return serde_json::from_str(json).map_err(|e| format!("Error parsing --config-json: {e}"));
    }

    let extent = match cli.extent.as_deref() {
        None => None,
        Some(&[min_x, min_y, max_x, max_y]) => Some(Extent::new(
            Point::new(min_x, min_y),
            Point::new(max_x, max_y),
        )),
        Some(values) => {
            return Err(format!(
                "--extent needs 4 values (MINX,MINY,MAXX,MAXY), got {}",
                values.len(),
            ));
        }
    };

    Ok(SampleConfig {
        invert_y: cli.invert_y,
        mid_points: cli.mid_points,
        extent,
    })
}

/// Read and parse the polyline file.
fn read_polyline(path: &Path) -> Result<Polyline, String> {
    let bytes =
        std::fs::read(path).map_err(|e| format!("Error reading {}: {e}", path.display()))?;
    serde_json::from_slice(&bytes).map_err(|e| format!("Error parsing {}: {e}", path.display()))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let config = match config_from_cli(&cli) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let polyline = match read_polyline(&cli.polyline_path) {
        Ok(p) => p,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    eprintln!(
        "Polyline: {} ({} vertices)",
        cli.polyline_path.display(),
        polyline.len(),
    );
    eprintln!("Spacing: {}", cli.spacing);
    eprintln!("Config: {config:#?}");
    eprintln!("Runs: {}", cli.runs);
    eprintln!();

    let mut all_diagnostics = Vec::with_capacity(cli.runs);

    for run in 0..cli.runs {
        if cli.runs > 1 {
            eprintln!("--- Run {}/{} ---", run + 1, cli.runs);
        }

        match linemarks_sampler::sample_with_diagnostics(&polyline, cli.spacing, &config, &WebClock)
        {
            Ok((samples, diagnostics)) => {
                if cli.json {
                    match serde_json::to_string_pretty(&diagnostics) {
                        Ok(json) => println!("{json}"),
                        Err(e) => {
                            eprintln!("Error serializing diagnostics: {e}");
                            return ExitCode::FAILURE;
                        }
                    }
                } else {
                    println!("{}", diagnostics.report());
                }

                // Write samples on the first run only.
                if run == 0
                    && let Some(ref output_path) = cli.output
                    && let Err(msg) = write_samples(output_path, &samples)
                {
                    eprintln!("{msg}");
                    return ExitCode::FAILURE;
                }

                all_diagnostics.push(diagnostics);
            }
            Err(e) => {
                eprintln!("Sampler error: {e}");
                return ExitCode::FAILURE;
            }
        }

        if cli.runs > 1 {
            eprintln!();
        }
    }

    // Print summary when multiple runs.
    if cli.runs > 1 {
        print_multi_run_summary(&all_diagnostics);
    }

    ExitCode::SUCCESS
}

/// Serialize samples as pretty JSON and write them to `path`.
fn write_samples(path: &Path, samples: &[linemarks_sampler::SamplePoint]) -> Result<(), String> {
    let json = serde_json::to_string_pretty(samples)
        .map_err(|e| format!("Error serializing samples: {e}"))?;
    std::fs::write(path, &json)
        .map_err(|e| format!("Error writing samples to {}: {e}", path.display()))?;
    eprintln!(
        "{} samples written to {} ({} bytes)",
        samples.len(),
        path.display(),
        json.len(),
    );
    Ok(())
}

/// Print aggregated statistics across multiple runs.
#[allow(clippy::cast_precision_loss)]
fn print_multi_run_summary(all_diagnostics: &[SampleDiagnostics]) {
    println!();
    println!(
        "Summary ({} runs)\n{}",
        all_diagnostics.len(),
        "=".repeat(60),
    );

    if all_diagnostics.is_empty() {
        println!("Warning: no diagnostics to summarize");
        return;
    }

    let durations: Vec<f64> = all_diagnostics
        .iter()
        .map(|d| duration_ms(d.duration))
        .collect();

    let min = durations.iter().copied().reduce(f64::min).unwrap_or(0.0);
    let max = durations.iter().copied().reduce(f64::max).unwrap_or(0.0);
    let mean = durations.iter().sum::<f64>() / durations.len() as f64;

    println!("Duration: min={min:.3}ms  mean={mean:.3}ms  max={max:.3}ms");
}
