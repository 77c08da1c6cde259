// Fencewave Gen - Command-line fixture generator
// Copyright (c) 2026 Fencewave Developers
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! # Fencewave Gen
//!
//! Command-line generator for labeled electric-fence waveform fixtures.
//!
//! ## Usage
//!
//! ```bash
//! # Six seconds of normal operation at 20 kHz into ./out
//! fencewave-gen
//!
//! # Reproducible arcing fixture with a manifest sidecar
//! fencewave-gen --scenario arcing --seed 42 --manifest
//!
//! # Physical cut three seconds in
//! fencewave-gen --scenario cut --cut-after 3.0
//! ```

use chrono::Utc;
use clap::Parser;
use fencewave::{
    generate_dataset, output_file_name, AdcModel, ConfigError, DatasetError, GenerationConfig,
    GenerationManifest, PulseSpec, Scenario,
};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

/// Fencewave fixture generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Window length in seconds
    #[arg(long, default_value = "6.0")]
    duration: f64,

    /// Sample rate in Hz
    #[arg(long, default_value = "20000.0")]
    fs: f64,

    /// Peak pulse amplitude in volts
    #[arg(long, default_value = "5000.0")]
    amp: f64,

    /// Pulse width in milliseconds
    #[arg(long, default_value = "1.0")]
    pwidth: f64,

    /// Pulse period in seconds
    #[arg(long, default_value = "1.0")]
    period: f64,

    /// Decay time constant in milliseconds
    #[arg(long, default_value = "3.0")]
    decay: f64,

    /// Voltage divider ratio (Vin/Vout)
    #[arg(long, default_value = "10000.0")]
    divider: f64,

    /// ADC bit depth
    #[arg(long, default_value = "12")]
    adc_bits: u8,

    /// ADC reference voltage in volts
    #[arg(long, default_value = "3.3")]
    vref: f64,

    /// Scenario: normal, short, cut, arcing, intermittent
    #[arg(long, default_value = "normal")]
    scenario: String,

    /// Simulate a physical cut: no pulses at or after this time (seconds)
    #[arg(long)]
    cut_after: Option<f64>,

    /// Output directory
    #[arg(long, default_value = "./out")]
    outdir: PathBuf,

    /// Random seed for reproducible fixtures
    #[arg(long)]
    seed: Option<u64>,

    /// Also write a JSON manifest next to the CSV
    #[arg(long, default_value = "false")]
    manifest: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Debug, Error)]
enum GenError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("manifest write failed: {0}")]
    Manifest(#[from] std::io::Error),
}

fn build_config(args: &Args) -> GenerationConfig {
    let scenario = Scenario::from_name(&args.scenario);
    if scenario.label() != args.scenario.trim().to_ascii_lowercase() {
        warn!(
            "unknown scenario '{}', falling back to normal",
            args.scenario
        );
    }

    let mut config = GenerationConfig::new()
        .with_duration_s(args.duration)
        .with_sample_rate_hz(args.fs)
        .with_pulse(PulseSpec::new(args.amp, args.pwidth, args.decay))
        .with_period_s(args.period)
        .with_scenario(scenario)
        .with_adc(AdcModel::new(args.divider, args.vref, args.adc_bits));
    if let Some(cutoff) = args.cut_after {
        config = config.with_cutoff_s(cutoff);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    config
}

fn run(args: &Args) -> Result<PathBuf, GenError> {
    let config = build_config(args);

    info!(
        "generating scenario '{}': {} s at {} Hz",
        config.scenario.label(),
        config.duration_s,
        config.sample_rate_hz
    );

    let dataset = generate_dataset(&config)?;
    let outpath = args
        .outdir
        .join(output_file_name(config.scenario.label(), Utc::now()));
    dataset.to_csv(&outpath)?;

    info!("wrote {} samples to {}", dataset.len(), outpath.display());

    if args.manifest {
        let manifest_path = manifest_path(&outpath);
        GenerationManifest::new(&config, &dataset).save(&manifest_path)?;
        info!("wrote manifest to {}", manifest_path.display());
    }

    Ok(outpath)
}

fn manifest_path(csv_path: &Path) -> PathBuf {
    csv_path.with_extension("manifest.json")
}

fn main() {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };
        EnvFilter::from_default_env().add_directive(level.into())
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("fencewave-gen v{}", env!("CARGO_PKG_VERSION"));

    match run(&args) {
        Ok(path) => println!("Exported: {}", path.display()),
        Err(e) => {
            tracing::error!("generation failed: {}", e);
            std::process::exit(1);
        }
    }
}
