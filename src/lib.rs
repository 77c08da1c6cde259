// Fencewave - Electric fence pulse train simulator
// Copyright (c) 2026 Fencewave Developers
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! # Fencewave
//!
//! Electric-fence pulse waveform synthesis and ADC quantization, for building
//! labeled calibration/test fixtures for fence-monitoring pipelines.
//!
//! Given a scenario (normal operation, near-short, physical cut, arcing,
//! intermittent contact) the generator synthesizes a high-voltage pulse train
//! with a Gaussian rise and one-sided exponential decay, overlays
//! scenario-specific distortions plus global noise and drift, and converts
//! the analog waveform into the fixed-point sample stream an embedded ADC
//! would produce behind a voltage divider.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fencewave::{generate_dataset, GenerationConfig, Scenario};
//!
//! // Two seconds of arcing-fault waveform, reproducible under seed 42.
//! let config = GenerationConfig::new()
//!     .with_duration_s(2.0)
//!     .with_sample_rate_hz(20_000.0)
//!     .with_scenario(Scenario::arcing())
//!     .with_seed(42);
//!
//! let dataset = generate_dataset(&config).unwrap();
//! dataset.to_csv("out/arcing_fixture.csv").unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`pulse`]: single-pulse shape model
//! - [`scenario`]: scenario taxonomy and alert-severity mapping
//! - [`generator`]: waveform composition, configuration, seeded RNG
//! - [`adc`]: voltage-divider and quantization model
//! - [`dataset`]: sample container and atomic CSV export
//! - [`manifest`]: JSON sidecar for fixture bookkeeping
//!
//! ## Determinism
//!
//! Every random draw (measurement noise, intermittent pulse skipping) comes
//! from one owned generator created per invocation from
//! [`GenerationConfig::with_seed`]. Same seed and config, same dataset,
//! bit for bit.

pub mod adc;
pub mod dataset;
pub mod generator;
pub mod manifest;
pub mod pulse;
pub mod scenario;

// Re-exports for convenient access
pub use adc::AdcModel;
pub use dataset::{output_file_name, DatasetError, DatasetStats, PulseDataset, SampleRecord};
pub use generator::{compose_waveform, generate_dataset, ConfigError, GenerationConfig, TimeVector};
pub use manifest::GenerationManifest;
pub use pulse::PulseSpec;
pub use scenario::{AlertSeverity, Scenario};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
