// Fencewave - Generation manifest
// Copyright (c) 2026 Fencewave Developers
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! JSON sidecar describing a generated dataset.
//!
//! A manifest snapshots everything needed to reproduce or interpret a
//! fixture: scenario and parameters, seed, sample count, voltage summary,
//! the alert class a correct downstream classifier should raise, and the
//! generation timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::adc::AdcModel;
use crate::dataset::{DatasetStats, PulseDataset};
use crate::generator::GenerationConfig;
use crate::pulse::PulseSpec;
use crate::scenario::{AlertSeverity, Scenario};

/// Manifest describing one generated dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationManifest {
    /// Scenario label (matches the CSV file name prefix).
    pub scenario_label: String,
    /// Full scenario with its per-kind parameters.
    pub scenario: Scenario,
    /// Severity a correct downstream classifier should raise.
    pub expected_alert: AlertSeverity,
    /// Window length in seconds.
    pub duration_s: f64,
    /// Sample rate in hertz.
    pub sample_rate_hz: f64,
    /// Pulse period in seconds.
    pub period_s: f64,
    /// Cutoff time, if one was set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cutoff_s: Option<f64>,
    /// Pulse parameters.
    pub pulse: PulseSpec,
    /// Divider + ADC model.
    pub adc: AdcModel,
    /// Random seed used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Number of exported samples.
    pub sample_count: usize,
    /// Voltage/code summary, absent for an empty dataset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<DatasetStats>,
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Generator version.
    pub generator_version: String,
}

impl GenerationManifest {
    /// Snapshot a configuration and its generated dataset.
    pub fn new(config: &GenerationConfig, dataset: &PulseDataset) -> Self {
        Self {
            scenario_label: config.scenario.label().to_string(),
            scenario: config.scenario.clone(),
            expected_alert: config.scenario.expected_alert(),
            duration_s: config.duration_s,
            sample_rate_hz: config.sample_rate_hz,
            period_s: config.period_s,
            cutoff_s: config.cutoff_s,
            pulse: config.pulse,
            adc: config.adc,
            seed: config.seed,
            sample_count: dataset.len(),
            stats: dataset.stats(),
            generated_at: Utc::now(),
            generator_version: crate::VERSION.to_string(),
        }
    }

    /// Serialize to a pretty JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Save to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), std::io::Error> {
        let json = self
            .to_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)
    }

    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, std::io::Error> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
