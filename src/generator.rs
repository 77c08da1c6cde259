// Fencewave - Scenario composer
// Copyright (c) 2026 Fencewave Developers
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! Waveform composition and the main generation API.
//!
//! The composer lays periodic pulse centers across the sample window, applies
//! the scenario-specific synthesis for each center, then overlays the global
//! noise and leakage-drift terms. Randomness is never ambient: the generator
//! owns one RNG per invocation, seeded from the configuration, so the same
//! seed and config always reproduce the same waveform bit for bit.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use thiserror::Error;

use crate::adc::AdcModel;
use crate::dataset::PulseDataset;
use crate::pulse::PulseSpec;
use crate::scenario::Scenario;

/// Configuration error types.
///
/// All of these are raised by validation before any array is allocated.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("peak amplitude must be finite and non-negative, got {value}")]
    InvalidAmplitude { value: f64 },

    #[error("ADC bit depth must be between 1 and 32, got {bits}")]
    InvalidBitDepth { bits: u8 },
}

/// Evenly spaced sample instants over `[0, duration)`.
///
/// Half-open linspace semantics: `t[i] = i * duration / len` with
/// `len = trunc(duration * sample_rate)`, so when `duration * sample_rate` is
/// integral the spacing is exactly `1 / sample_rate` and the last instant
/// falls strictly before `duration`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeVector {
    samples: Vec<f64>,
}

impl TimeVector {
    /// Build the sample instants for a window of `duration_s` seconds at
    /// `sample_rate_hz`.
    pub fn new(duration_s: f64, sample_rate_hz: f64) -> Self {
        let n = (duration_s * sample_rate_hz) as usize;
        let samples = (0..n).map(|i| i as f64 * duration_s / n as f64).collect();
        Self { samples }
    }

    /// Number of sample instants.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the window holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The instants as a slice, in time order.
    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    /// Consume into the underlying vector.
    pub fn into_vec(self) -> Vec<f64> {
        self.samples
    }
}

/// Full generation configuration: window, pulse, scenario, ADC front-end,
/// and the reproducibility seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Window length in seconds.
    pub duration_s: f64,
    /// Sample rate in hertz.
    pub sample_rate_hz: f64,
    /// Idealized pulse parameters.
    pub pulse: PulseSpec,
    /// Pulse period in seconds; the first center sits at half a period.
    pub period_s: f64,
    /// Optional cutoff time in seconds. No pulse centers at or after the
    /// cutoff are emitted, for any scenario. A cutoff at or past the end of
    /// the window is equivalent to no cutoff.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cutoff_s: Option<f64>,
    /// Operating or fault scenario.
    pub scenario: Scenario,
    /// Divider + ADC model.
    pub adc: AdcModel,
    /// Random seed for reproducibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            duration_s: 6.0,
            sample_rate_hz: 20_000.0,
            pulse: PulseSpec::default(),
            period_s: 1.0,
            cutoff_s: None,
            scenario: Scenario::Normal,
            adc: AdcModel::default(),
            seed: None,
        }
    }
}

impl GenerationConfig {
    /// Create a config with the default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window length in seconds.
    pub fn with_duration_s(mut self, duration_s: f64) -> Self {
        self.duration_s = duration_s;
        self
    }

    /// Set the sample rate in hertz.
    pub fn with_sample_rate_hz(mut self, sample_rate_hz: f64) -> Self {
        self.sample_rate_hz = sample_rate_hz;
        self
    }

    /// Set the pulse parameters.
    pub fn with_pulse(mut self, pulse: PulseSpec) -> Self {
        self.pulse = pulse;
        self
    }

    /// Set the pulse period in seconds.
    pub fn with_period_s(mut self, period_s: f64) -> Self {
        self.period_s = period_s;
        self
    }

    /// Set the cutoff time in seconds.
    pub fn with_cutoff_s(mut self, cutoff_s: f64) -> Self {
        self.cutoff_s = Some(cutoff_s);
        self
    }

    /// Set the scenario.
    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenario = scenario;
        self
    }

    /// Set the ADC front-end model.
    pub fn with_adc(mut self, adc: AdcModel) -> Self {
        self.adc = adc;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Expected number of samples for this window.
    pub fn sample_count(&self) -> usize {
        (self.duration_s * self.sample_rate_hz) as usize
    }

    /// Check every parameter the synthesis and quantization math relies on.
    ///
    /// Runs before any array allocation; a config that passes here cannot
    /// make the downstream math divide by zero or overflow a code.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.duration_s.is_finite() || self.duration_s <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "duration",
                value: self.duration_s,
            });
        }
        if !self.sample_rate_hz.is_finite() || self.sample_rate_hz <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "sample rate",
                value: self.sample_rate_hz,
            });
        }
        if !self.period_s.is_finite() || self.period_s <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "pulse period",
                value: self.period_s,
            });
        }
        if !self.pulse.amplitude_v.is_finite() || self.pulse.amplitude_v < 0.0 {
            return Err(ConfigError::InvalidAmplitude {
                value: self.pulse.amplitude_v,
            });
        }
        if !self.pulse.width_ms.is_finite() || self.pulse.width_ms <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "pulse width",
                value: self.pulse.width_ms,
            });
        }
        if !self.pulse.decay_ms.is_finite() || self.pulse.decay_ms <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "decay constant",
                value: self.pulse.decay_ms,
            });
        }
        self.adc.validate()
    }
}

fn add_pulse(waveform: &mut [f64], times: &[f64], spec: &PulseSpec, center: f64) {
    for (v, &t) in waveform.iter_mut().zip(times) {
        *v += spec.value_at(t, center);
    }
}

fn add_arcing_burst(
    waveform: &mut [f64],
    times: &[f64],
    peak_v: f64,
    sigma_s: f64,
    freq_hz: f64,
    center: f64,
) {
    for (v, &t) in waveform.iter_mut().zip(times) {
        let dt = t - center;
        let x = dt / sigma_s;
        *v += peak_v * (-0.5 * x * x).exp() * (TAU * freq_hz * dt).sin();
    }
}

/// Compose the analog waveform for a validated configuration.
///
/// Pulse centers form an arithmetic progression starting at half a period,
/// stepping by one period, strictly inside the window; the progression stops
/// early at the cutoff when one is set. Scenario synthesis runs per center in
/// time order, then the global noise and drift terms are added over the full
/// buffer. Intermittent draws and noise samples come from `rng` in a fixed
/// order, so the caller's seed fully determines the output.
pub fn compose_waveform(
    config: &GenerationConfig,
    times: &TimeVector,
    rng: &mut dyn RngCore,
) -> Vec<f64> {
    let t = times.as_slice();
    let mut waveform = vec![0.0; t.len()];
    let amp = config.pulse.amplitude_v;

    let mut center = config.period_s / 2.0;
    while center < config.duration_s {
        if let Some(cutoff) = config.cutoff_s {
            if center >= cutoff {
                break;
            }
        }

        match &config.scenario {
            // Cut synthesizes like normal; the cutoff stop above is what
            // realizes the break.
            Scenario::Normal | Scenario::Cut => {
                add_pulse(&mut waveform, t, &config.pulse, center);
            }
            Scenario::Short {
                amp_scale,
                width_scale,
                decay_scale,
            } => {
                let derated = config.pulse.scaled(*amp_scale, *width_scale, *decay_scale);
                add_pulse(&mut waveform, t, &derated, center);
            }
            Scenario::Arcing {
                burst_ratio,
                burst_sigma_s,
                burst_freq_hz,
            } => {
                add_pulse(&mut waveform, t, &config.pulse, center);
                add_arcing_burst(
                    &mut waveform,
                    t,
                    burst_ratio * amp,
                    *burst_sigma_s,
                    *burst_freq_hz,
                    center,
                );
            }
            Scenario::Intermittent { emit_probability } => {
                // One draw per candidate center, in center order.
                if rng.gen::<f64>() < *emit_probability {
                    add_pulse(&mut waveform, t, &config.pulse, center);
                }
            }
        }

        center += config.period_s;
    }

    // Global terms, applied for every scenario: measurement noise and a slow
    // leakage drift away from the first sample instant.
    let t_start = t.first().copied().unwrap_or(0.0);
    let noise = Normal::new(0.0, 0.02 * amp).unwrap();
    for (v, &ti) in waveform.iter_mut().zip(t) {
        *v += noise.sample(rng);
        *v += -0.0001 * amp * (ti - t_start);
    }

    waveform
}

/// Run the full pipeline: validate, synthesize, quantize, bundle.
pub fn generate_dataset(config: &GenerationConfig) -> Result<PulseDataset, ConfigError> {
    config.validate()?;

    let mut rng: Box<dyn RngCore> = match config.seed {
        Some(s) => Box::new(StdRng::seed_from_u64(s)),
        None => Box::new(StdRng::from_entropy()),
    };

    let times = TimeVector::new(config.duration_s, config.sample_rate_hz);
    let voltages = compose_waveform(config, &times, &mut *rng);
    let adc_values = config.adc.quantize_all(&voltages);

    Ok(PulseDataset {
        scenario: config.scenario.label().to_string(),
        times: times.into_vec(),
        voltages,
        adc_values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_time_vector_spacing() {
        let times = TimeVector::new(2.0, 1000.0);
        assert_eq!(times.len(), 2000);
        assert_eq!(times.as_slice()[0], 0.0);
        assert_relative_eq!(times.as_slice()[1], 0.001, max_relative = 1e-12);
        assert_relative_eq!(times.as_slice()[1999], 1.999, max_relative = 1e-12);
        // Strictly increasing, uniform spacing.
        let t = times.as_slice();
        for w in t.windows(2) {
            assert_relative_eq!(w[1] - w[0], 0.001, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_time_vector_stays_inside_window() {
        let times = TimeVector::new(0.5, 44_100.0);
        assert!(times.as_slice().iter().all(|&t| t < 0.5));
    }

    #[test]
    fn test_default_config_matches_cli_defaults() {
        let config = GenerationConfig::default();
        assert_eq!(config.duration_s, 6.0);
        assert_eq!(config.sample_rate_hz, 20_000.0);
        assert_eq!(config.pulse.amplitude_v, 5000.0);
        assert_eq!(config.period_s, 1.0);
        assert_eq!(config.cutoff_s, None);
        assert_eq!(config.scenario, Scenario::Normal);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_window() {
        let bad = [
            GenerationConfig::new().with_duration_s(0.0),
            GenerationConfig::new().with_duration_s(-1.0),
            GenerationConfig::new().with_duration_s(f64::NAN),
            GenerationConfig::new().with_sample_rate_hz(0.0),
            GenerationConfig::new().with_period_s(-1.0),
        ];
        for config in bad {
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn test_validate_rejects_bad_pulse() {
        let mut config = GenerationConfig::new();
        config.pulse.amplitude_v = -5.0;
        assert!(config.validate().is_err());

        let mut config = GenerationConfig::new();
        config.pulse.width_ms = 0.0;
        assert!(config.validate().is_err());

        let mut config = GenerationConfig::new();
        config.pulse.decay_ms = -3.0;
        assert!(config.validate().is_err());

        // Zero amplitude is a degenerate but legal pulse.
        let mut config = GenerationConfig::new();
        config.pulse.amplitude_v = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pulse_centers_land_at_half_period() {
        let config = GenerationConfig::new()
            .with_duration_s(2.0)
            .with_sample_rate_hz(1000.0)
            .with_seed(7);
        let dataset = generate_dataset(&config).unwrap();

        // Centers at 0.5 s and 1.5 s; peaks near amp, midpoints near zero.
        assert!(dataset.voltages[500] > 4000.0);
        assert!(dataset.voltages[1500] > 4000.0);
        assert!(dataset.voltages[0].abs() < 1000.0);
        assert!(dataset.voltages[1000].abs() < 1000.0);
    }

    #[test]
    fn test_cutoff_stops_every_scenario() {
        for scenario in [Scenario::Normal, Scenario::short(), Scenario::arcing()] {
            let config = GenerationConfig::new()
                .with_duration_s(4.0)
                .with_sample_rate_hz(1000.0)
                .with_scenario(scenario)
                .with_cutoff_s(2.0)
                .with_seed(11);
            let dataset = generate_dataset(&config).unwrap();

            // Centers 2.5 and 3.5 fall past the cutoff; only noise and drift
            // remain there.
            assert!(dataset.voltages[2500].abs() < 1000.0);
            assert!(dataset.voltages[3500].abs() < 1000.0);
        }
    }

    #[test]
    fn test_cutoff_past_window_is_no_cutoff() {
        let with = GenerationConfig::new()
            .with_duration_s(2.0)
            .with_sample_rate_hz(1000.0)
            .with_cutoff_s(10.0)
            .with_seed(3);
        let without = GenerationConfig::new()
            .with_duration_s(2.0)
            .with_sample_rate_hz(1000.0)
            .with_seed(3);
        assert_eq!(
            generate_dataset(&with).unwrap().voltages,
            generate_dataset(&without).unwrap().voltages
        );
    }

    #[test]
    fn test_same_seed_reproduces_dataset() {
        let config = GenerationConfig::new()
            .with_duration_s(1.0)
            .with_sample_rate_hz(2000.0)
            .with_scenario(Scenario::intermittent())
            .with_seed(42);

        let a = generate_dataset(&config).unwrap();
        let b = generate_dataset(&config).unwrap();
        assert_eq!(a.times, b.times);
        assert_eq!(a.voltages, b.voltages);
        assert_eq!(a.adc_values, b.adc_values);
    }

    #[test]
    fn test_different_seeds_differ() {
        let base = GenerationConfig::new()
            .with_duration_s(1.0)
            .with_sample_rate_hz(2000.0);
        let a = generate_dataset(&base.clone().with_seed(1)).unwrap();
        let b = generate_dataset(&base.with_seed(2)).unwrap();
        assert_ne!(a.voltages, b.voltages);
    }

    #[test]
    fn test_short_scenario_derates_peak() {
        let config = GenerationConfig::new()
            .with_duration_s(1.0)
            .with_sample_rate_hz(1000.0)
            .with_scenario(Scenario::short())
            .with_seed(5);
        let dataset = generate_dataset(&config).unwrap();

        // Peak at the 0.5 s center sits near 0.25 * 5000 = 1250 V.
        let peak = dataset.voltages[500];
        assert!(peak > 800.0 && peak < 1700.0, "peak was {}", peak);
    }

    #[test]
    fn test_arcing_adds_energy_around_center() {
        let base = GenerationConfig::new()
            .with_duration_s(1.0)
            .with_sample_rate_hz(20_000.0)
            .with_seed(9);
        let normal = generate_dataset(&base.clone()).unwrap();
        let arcing = generate_dataset(&base.with_scenario(Scenario::arcing())).unwrap();

        // Same seed, same noise draws, so the difference is exactly the
        // burst: zero at the center (sin 0), nonzero just off it.
        let center = 10_000;
        let mut burst_energy = 0.0;
        for i in center - 40..center + 40 {
            burst_energy += (arcing.voltages[i] - normal.voltages[i]).abs();
        }
        assert!(burst_energy > 1000.0);

        // Far from any center the burst envelope has died off.
        let far = 5_000;
        assert_relative_eq!(arcing.voltages[far], normal.voltages[far], epsilon = 1e-6);
    }

    #[test]
    fn test_drift_pulls_late_samples_down() {
        let config = GenerationConfig::new()
            .with_duration_s(200.0)
            .with_sample_rate_hz(10.0)
            .with_period_s(1000.0) // no centers inside the window
            .with_seed(13);
        let dataset = generate_dataset(&config).unwrap();

        // Drift is -0.0001 * 5000 = -0.5 V/s, so the last stretch of the
        // window sits around -95 V while the head sits near zero. Averaging
        // 200 samples shrinks the 100 V noise well below that gap.
        let tail: f64 =
            dataset.voltages[1800..].iter().sum::<f64>() / dataset.voltages[1800..].len() as f64;
        let head: f64 =
            dataset.voltages[..200].iter().sum::<f64>() / dataset.voltages[..200].len() as f64;
        assert!(tail < head - 50.0);
    }

    #[test]
    fn test_zero_amplitude_is_noise_free_flat_line() {
        let mut config = GenerationConfig::new()
            .with_duration_s(1.0)
            .with_sample_rate_hz(100.0)
            .with_seed(1);
        config.pulse.amplitude_v = 0.0;
        let dataset = generate_dataset(&config).unwrap();

        // Noise sigma and drift both scale with amplitude.
        assert!(dataset.voltages.iter().all(|&v| v == 0.0));
        assert!(dataset.adc_values.iter().all(|&a| a == 0));
    }
}
