// Fencewave - Sample exporter
// Copyright (c) 2026 Fencewave Developers
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! Dataset container and CSV I/O.
//!
//! A [`PulseDataset`] holds the parallel (time, voltage, code) columns of one
//! generation run. Export writes the rows to a temporary file in the
//! destination directory and atomically persists it, so a failed export never
//! leaves a partial file behind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Column header of every exported file.
pub const CSV_HEADER: &str = "time_s,voltage_V,adc_value";

/// Dataset error types.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not finalize export: {0}")]
    Persist(std::io::Error),

    #[error("CSV parse error at line {line}: {message}")]
    CsvParse { line: usize, message: String },

    #[error("unexpected header, want `{CSV_HEADER}`, got `{0}`")]
    Header(String),

    #[error("empty dataset file")]
    Empty,

    #[error("column lengths differ: {times} times, {voltages} voltages, {codes} codes")]
    LengthMismatch {
        times: usize,
        voltages: usize,
        codes: usize,
    },
}

/// One exported row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    /// Sample instant in seconds from window start.
    pub time_s: f64,
    /// Pre-divider analog voltage in volts.
    pub voltage_v: f64,
    /// Quantized ADC code.
    pub adc_value: u32,
}

/// Summary statistics over a dataset's voltage and code columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub count: usize,
    pub min_voltage_v: f64,
    pub max_voltage_v: f64,
    pub mean_voltage_v: f64,
    pub peak_code: u32,
}

/// Parallel (time, voltage, code) columns of one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct PulseDataset {
    /// Scenario label the run was generated under.
    pub scenario: String,
    /// Sample instants, seconds, strictly increasing.
    pub times: Vec<f64>,
    /// Pre-divider voltages, volts.
    pub voltages: Vec<f64>,
    /// Quantized ADC codes.
    pub adc_values: Vec<u32>,
}

impl PulseDataset {
    /// Bundle columns into a dataset, enforcing equal lengths.
    pub fn new(
        scenario: &str,
        times: Vec<f64>,
        voltages: Vec<f64>,
        adc_values: Vec<u32>,
    ) -> Result<Self, DatasetError> {
        if times.len() != voltages.len() || times.len() != adc_values.len() {
            return Err(DatasetError::LengthMismatch {
                times: times.len(),
                voltages: voltages.len(),
                codes: adc_values.len(),
            });
        }
        Ok(Self {
            scenario: scenario.to_string(),
            times,
            voltages,
            adc_values,
        })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True when the dataset holds no samples.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Row at `index`.
    pub fn record(&self, index: usize) -> SampleRecord {
        SampleRecord {
            time_s: self.times[index],
            voltage_v: self.voltages[index],
            adc_value: self.adc_values[index],
        }
    }

    /// Iterate over the rows in time order.
    pub fn records(&self) -> impl Iterator<Item = SampleRecord> + '_ {
        (0..self.len()).map(|i| self.record(i))
    }

    /// Summary statistics, `None` for an empty dataset.
    pub fn stats(&self) -> Option<DatasetStats> {
        if self.is_empty() {
            return None;
        }
        let min = self.voltages.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = self
            .voltages
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max);
        let mean = self.voltages.iter().sum::<f64>() / self.len() as f64;
        let peak_code = self.adc_values.iter().copied().max().unwrap_or(0);
        Some(DatasetStats {
            count: self.len(),
            min_voltage_v: min,
            max_voltage_v: max,
            mean_voltage_v: mean,
            peak_code,
        })
    }

    /// Export to a CSV file, all-or-nothing.
    ///
    /// Creates the destination directory if needed, writes header and rows
    /// (time at 8 decimals, voltage at 6, code as a bare integer) to a
    /// temporary file in that directory, then atomically renames it onto the
    /// final path. On any error the destination is untouched.
    pub fn to_csv(&self, path: impl AsRef<Path>) -> Result<(), DatasetError> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            writeln!(writer, "{}", CSV_HEADER)?;
            for i in 0..self.len() {
                writeln!(
                    writer,
                    "{:.8},{:.6},{}",
                    self.times[i], self.voltages[i], self.adc_values[i]
                )?;
            }
            writer.flush()?;
        }
        tmp.persist(path).map_err(|e| DatasetError::Persist(e.error))?;
        Ok(())
    }

    /// Read an exported file back.
    ///
    /// The header is validated and every row parsed; parse failures report
    /// their line number. The scenario label is recovered from the file stem
    /// (the part before the first underscore, per the canonical naming).
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut lines = reader.lines();

        let header = lines.next().ok_or(DatasetError::Empty)??;
        if header.trim() != CSV_HEADER {
            return Err(DatasetError::Header(header));
        }

        let mut times = Vec::new();
        let mut voltages = Vec::new();
        let mut adc_values = Vec::new();

        for (line_num, line_result) in lines.enumerate() {
            let line = line_result?;
            if line.trim().is_empty() {
                continue;
            }
            fn parse_field<'a>(
                field: Option<&'a str>,
                what: &str,
                line_num: usize,
            ) -> Result<&'a str, DatasetError> {
                field.ok_or_else(|| DatasetError::CsvParse {
                    line: line_num + 2,
                    message: format!("missing {} field", what),
                })
            }
            let mut fields = line.split(',');
            let time: f64 = parse_field(fields.next(), "time", line_num)?.trim().parse().map_err(|_| {
                DatasetError::CsvParse {
                    line: line_num + 2,
                    message: "invalid time".to_string(),
                }
            })?;
            let voltage: f64 =
                parse_field(fields.next(), "voltage", line_num)?
                    .trim()
                    .parse()
                    .map_err(|_| DatasetError::CsvParse {
                        line: line_num + 2,
                        message: "invalid voltage".to_string(),
                    })?;
            let code: u32 =
                parse_field(fields.next(), "adc", line_num)?
                    .trim()
                    .parse()
                    .map_err(|_| DatasetError::CsvParse {
                        line: line_num + 2,
                        message: "invalid adc value".to_string(),
                    })?;
            times.push(time);
            voltages.push(voltage);
            adc_values.push(code);
        }

        let scenario = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.split('_').next().unwrap_or(s).to_string())
            .unwrap_or_default();

        PulseDataset::new(&scenario, times, voltages, adc_values)
    }
}

/// Canonical output file name: `{scenario}_{YYYYMMDDTHHMMSSZ}.csv`.
pub fn output_file_name(scenario_label: &str, timestamp: DateTime<Utc>) -> String {
    format!(
        "{}_{}.csv",
        scenario_label,
        timestamp.format("%Y%m%dT%H%M%SZ")
    )
}
