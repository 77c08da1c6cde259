// Fencewave - Scenario taxonomy
// Copyright (c) 2026 Fencewave Developers
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! Operating/fault scenarios for labeled fixture generation.
//!
//! The scenario set is closed: every kind carries its own synthesis
//! parameters, and unknown labels parse to [`Scenario::Normal`] instead of
//! failing. Each scenario also maps to the alert severity a downstream
//! monitoring classifier is expected to raise when fed fixtures generated
//! under it.

use serde::{Deserialize, Serialize};

/// Alert severity taxonomy of the downstream monitoring service.
///
/// `Info` is the heartbeat class, `High` the tamper class, `Critical` the
/// line-fault class. Only the labels are mirrored here; the service itself
/// is a separate system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertSeverity {
    Info,
    High,
    Critical,
}

/// Operating or fault mode of the simulated fence line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scenario {
    /// Healthy line: every pulse emitted as specified.
    Normal,
    /// Near-short fault: a leak path diverts most of the pulse energy, so
    /// pulses come out derated in amplitude, width and decay.
    Short {
        amp_scale: f64,
        width_scale: f64,
        decay_scale: f64,
    },
    /// Physical wire break: normal pulses up to the configured cutoff time,
    /// nothing after it. The cutoff is what realizes the break.
    Cut,
    /// Arcing fault: normal pulses with a damped high-frequency burst
    /// superimposed at each pulse center.
    Arcing {
        /// Burst peak as a fraction of the pulse amplitude.
        burst_ratio: f64,
        /// Standard deviation of the burst's Gaussian envelope, seconds.
        burst_sigma_s: f64,
        /// Burst carrier frequency, Hz.
        burst_freq_hz: f64,
    },
    /// Intermittent contact: each candidate pulse is independently emitted
    /// with `emit_probability`, modeling an unreliable connection.
    Intermittent { emit_probability: f64 },
}

impl Scenario {
    /// Near-short derate with the standard factors (amplitude ×0.25,
    /// width ×0.7, decay ×0.5).
    pub fn short() -> Self {
        Scenario::Short {
            amp_scale: 0.25,
            width_scale: 0.7,
            decay_scale: 0.5,
        }
    }

    /// Arcing burst with the standard parameters: 30% of peak amplitude,
    /// 0.5 ms envelope, 5 kHz carrier.
    pub fn arcing() -> Self {
        Scenario::Arcing {
            burst_ratio: 0.3,
            burst_sigma_s: 0.0005,
            burst_freq_hz: 5000.0,
        }
    }

    /// Intermittent contact with the standard 0.7 emit probability.
    pub fn intermittent() -> Self {
        Scenario::Intermittent {
            emit_probability: 0.7,
        }
    }

    /// Parse a scenario label, case-insensitively.
    ///
    /// Unknown labels fall back to `Normal`. That silent degradation is the
    /// documented policy: a bad label must never abort a generation run.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "normal" => Scenario::Normal,
            "short" => Scenario::short(),
            "cut" => Scenario::Cut,
            "arcing" => Scenario::arcing(),
            "intermittent" => Scenario::intermittent(),
            _ => Scenario::Normal,
        }
    }

    /// Canonical label, used in output file names and manifests.
    pub fn label(&self) -> &'static str {
        match self {
            Scenario::Normal => "normal",
            Scenario::Short { .. } => "short",
            Scenario::Cut => "cut",
            Scenario::Arcing { .. } => "arcing",
            Scenario::Intermittent { .. } => "intermittent",
        }
    }

    /// Severity a correct downstream classifier should raise for fixtures
    /// generated under this scenario.
    pub fn expected_alert(&self) -> AlertSeverity {
        match self {
            Scenario::Normal => AlertSeverity::Info,
            Scenario::Short { .. } => AlertSeverity::Critical,
            Scenario::Cut => AlertSeverity::Critical,
            Scenario::Arcing { .. } => AlertSeverity::High,
            Scenario::Intermittent { .. } => AlertSeverity::High,
        }
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Scenario::Normal
    }
}
