// Fencewave - Pulse shape generator
// Copyright (c) 2026 Fencewave Developers
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! Single-pulse shape model.
//!
//! An energizer pulse rises with a Gaussian profile and collapses with a
//! one-sided exponential tail: the decay multiplier applies only from the
//! pulse center onward, so the rise is symmetric and the fall is not. This
//! asymmetry is the defining signature of the simulated waveform.

use serde::{Deserialize, Serialize};

/// Parameters of one idealized energizer pulse.
///
/// `width_ms` controls the rise sharpness: the Gaussian standard deviation is
/// one third of the width, expressed in seconds. `decay_ms` is the time
/// constant of the exponential tail applied from the pulse center onward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PulseSpec {
    /// Peak amplitude in volts, reached exactly at the pulse center.
    pub amplitude_v: f64,
    /// Nominal pulse width in milliseconds.
    pub width_ms: f64,
    /// Decay time constant in milliseconds.
    pub decay_ms: f64,
}

impl Default for PulseSpec {
    fn default() -> Self {
        Self {
            amplitude_v: 5000.0,
            width_ms: 1.0,
            decay_ms: 3.0,
        }
    }
}

impl PulseSpec {
    /// Create a pulse spec from amplitude (V), width (ms) and decay (ms).
    pub fn new(amplitude_v: f64, width_ms: f64, decay_ms: f64) -> Self {
        Self {
            amplitude_v,
            width_ms,
            decay_ms,
        }
    }

    /// Gaussian standard deviation of the rise, in seconds.
    pub fn sigma_s(&self) -> f64 {
        (self.width_ms / 1000.0) / 3.0
    }

    /// Decay time constant, in seconds.
    pub fn decay_s(&self) -> f64 {
        self.decay_ms / 1000.0
    }

    /// Analog contribution at time `t` of a pulse centered at `t0`.
    ///
    /// The Gaussian rise is evaluated everywhere; the exponential decay
    /// multiplies it only for `t >= t0` (the multiplier is exactly 1 before
    /// the center). Width and decay must be positive; callers go through
    /// [`GenerationConfig::validate`](crate::GenerationConfig::validate)
    /// before synthesis.
    pub fn value_at(&self, t: f64, t0: f64) -> f64 {
        let x = (t - t0) / self.sigma_s();
        let gauss = self.amplitude_v * (-0.5 * x * x).exp();
        if t >= t0 {
            gauss * (-(t - t0) / self.decay_s()).exp()
        } else {
            gauss
        }
    }

    /// Contribution over a whole sample window, one value per instant.
    pub fn contribution(&self, times: &[f64], t0: f64) -> Vec<f64> {
        times.iter().map(|&t| self.value_at(t, t0)).collect()
    }

    /// Derated copy with amplitude, width and decay each scaled.
    pub fn scaled(&self, amp_scale: f64, width_scale: f64, decay_scale: f64) -> Self {
        Self {
            amplitude_v: self.amplitude_v * amp_scale,
            width_ms: self.width_ms * width_scale,
            decay_ms: self.decay_ms * decay_scale,
        }
    }
}
