// Fencewave - ADC front-end model
// Copyright (c) 2026 Fencewave Developers
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! Voltage-divider and ADC quantization model.
//!
//! The fence line sits behind a resistive divider; the divided voltage is
//! clamped to the converter's input range and rounded onto a fixed-bit-depth
//! code scale. Swings below ground or above the reference truncate to the
//! rails, never wrapping and never going signed.

use serde::{Deserialize, Serialize};

use crate::generator::ConfigError;

/// Divider + ADC front-end parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdcModel {
    /// Voltage divider attenuation, Vin/Vout.
    pub divider_ratio: f64,
    /// ADC reference voltage in volts; the top of the conversion range.
    pub vref_v: f64,
    /// Converter resolution in bits, 1..=32.
    pub resolution_bits: u8,
}

impl Default for AdcModel {
    fn default() -> Self {
        Self {
            divider_ratio: 10_000.0,
            vref_v: 3.3,
            resolution_bits: 12,
        }
    }
}

impl AdcModel {
    /// Create a model from divider ratio, reference voltage and bit depth.
    pub fn new(divider_ratio: f64, vref_v: f64, resolution_bits: u8) -> Self {
        Self {
            divider_ratio,
            vref_v,
            resolution_bits,
        }
    }

    /// Set the divider ratio.
    pub fn with_divider_ratio(mut self, divider_ratio: f64) -> Self {
        self.divider_ratio = divider_ratio;
        self
    }

    /// Set the reference voltage.
    pub fn with_vref_v(mut self, vref_v: f64) -> Self {
        self.vref_v = vref_v;
        self
    }

    /// Set the resolution in bits.
    pub fn with_resolution_bits(mut self, resolution_bits: u8) -> Self {
        self.resolution_bits = resolution_bits;
        self
    }

    /// Highest representable code, `2^bits - 1`.
    ///
    /// Well-defined for validated models (bit depth 1..=32).
    pub fn max_code(&self) -> u32 {
        ((1u64 << self.resolution_bits) - 1) as u32
    }

    /// Check that quantization is well-defined for these parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.divider_ratio.is_finite() || self.divider_ratio <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "divider ratio",
                value: self.divider_ratio,
            });
        }
        if !self.vref_v.is_finite() || self.vref_v <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "reference voltage",
                value: self.vref_v,
            });
        }
        if self.resolution_bits == 0 || self.resolution_bits > 32 {
            return Err(ConfigError::InvalidBitDepth {
                bits: self.resolution_bits,
            });
        }
        Ok(())
    }

    /// Quantize one pre-divider voltage to an ADC code.
    pub fn quantize(&self, voltage_v: f64) -> u32 {
        let v_out = voltage_v / self.divider_ratio;
        let clamped = v_out.max(0.0).min(self.vref_v);
        ((clamped / self.vref_v) * self.max_code() as f64).round() as u32
    }

    /// Quantize a whole waveform.
    pub fn quantize_all(&self, waveform: &[f64]) -> Vec<u32> {
        waveform.iter().map(|&v| self.quantize(v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model() {
        let adc = AdcModel::default();
        assert_eq!(adc.divider_ratio, 10_000.0);
        assert_eq!(adc.vref_v, 3.3);
        assert_eq!(adc.resolution_bits, 12);
        assert_eq!(adc.max_code(), 4095);
    }

    #[test]
    fn test_builder_methods() {
        let adc = AdcModel::default()
            .with_divider_ratio(1000.0)
            .with_vref_v(5.0)
            .with_resolution_bits(10);
        assert_eq!(adc.divider_ratio, 1000.0);
        assert_eq!(adc.vref_v, 5.0);
        assert_eq!(adc.max_code(), 1023);
    }

    #[test]
    fn test_default_divider_leaves_headroom() {
        // 5 kV through a 10000:1 divider is 0.5 V, well inside the 3.3 V
        // range: round(0.5 / 3.3 * 4095) = 620, no clamping.
        let adc = AdcModel::default();
        assert_eq!(adc.quantize(5000.0), 620);
        assert!(adc.quantize(5000.0) < adc.max_code());
    }

    #[test]
    fn test_tight_divider_clamps_to_full_scale() {
        // 5 kV through 1000:1 is 5 V, above the 3.3 V reference.
        let adc = AdcModel::default().with_divider_ratio(1000.0);
        assert_eq!(adc.quantize(5000.0), 4095);
    }

    #[test]
    fn test_clamping_holds_for_pathological_inputs() {
        let adc = AdcModel::default();
        assert_eq!(adc.quantize(1.0e12), 4095);
        assert_eq!(adc.quantize(-1.0e12), 0);
        assert_eq!(adc.quantize(0.0), 0);
        assert_eq!(adc.quantize(-0.0001), 0);
    }

    #[test]
    fn test_full_scale_at_reference() {
        let adc = AdcModel::default();
        // Exactly vref after division.
        assert_eq!(adc.quantize(3.3 * 10_000.0), 4095);
    }

    #[test]
    fn test_quantization_is_monotonic() {
        let adc = AdcModel::default();
        let mut last = 0;
        for i in 0..2000 {
            // Sweep from below ground to above the clamp rail.
            let v = -5000.0 + i as f64 * 25.0;
            let code = adc.quantize(v);
            assert!(code >= last, "code regressed at {} V", v);
            assert!(code <= adc.max_code());
            last = code;
        }
        assert_eq!(last, adc.max_code());
    }

    #[test]
    fn test_single_bit_resolution() {
        let adc = AdcModel::new(1.0, 1.0, 1);
        assert_eq!(adc.max_code(), 1);
        assert_eq!(adc.quantize(0.0), 0);
        assert_eq!(adc.quantize(0.2), 0);
        assert_eq!(adc.quantize(0.8), 1);
        assert_eq!(adc.quantize(1.0), 1);
    }

    #[test]
    fn test_quantize_all_maps_every_sample() {
        let adc = AdcModel::default();
        let waveform = vec![0.0, 5000.0, -20.0, 40_000.0];
        assert_eq!(adc.quantize_all(&waveform), vec![0, 620, 0, 4095]);
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        assert!(AdcModel::new(0.0, 3.3, 12).validate().is_err());
        assert!(AdcModel::new(-1.0, 3.3, 12).validate().is_err());
        assert!(AdcModel::new(10_000.0, 0.0, 12).validate().is_err());
        assert!(AdcModel::new(10_000.0, -3.3, 12).validate().is_err());
        assert!(AdcModel::new(10_000.0, 3.3, 0).validate().is_err());
        assert!(AdcModel::new(10_000.0, 3.3, 33).validate().is_err());
        assert!(AdcModel::default().validate().is_ok());
        assert!(AdcModel::new(10_000.0, 3.3, 32).validate().is_ok());
    }
}
