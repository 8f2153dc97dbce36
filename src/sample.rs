//! # Synthetic Melting Trace
//!
//! Deterministic stand-in for a DTA recording of an Al-Si alloy heated through
//! its melting range: a linear temperature ramp, a gently sloped baseline and
//! an endothermic dip that starts near 630 °C. Used by the demo, the
//! benchmarks and the tests.

use serde::{Deserialize, Serialize};

use crate::ingest::{RawRow, RawValue, Sample};

/// Shape of a synthetic run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeltingTrace {
    /// Temperature at time zero, °C
    pub start_temperature: f64,
    /// Temperature of the last sample, °C
    pub end_temperature: f64,
    /// Heating rate, °C per second
    pub heating_rate: f64,
    /// Time between samples, seconds
    pub sample_interval: f64,
    /// Signal at the start temperature
    pub baseline_offset: f64,
    /// Baseline drift, signal units per °C
    pub baseline_slope: f64,
    /// Temperature where the dip begins, °C
    pub onset_temperature: f64,
    /// Temperature distance from onset to the bottom of the dip, °C
    pub peak_width: f64,
    /// Depth of the dip below the baseline
    pub peak_depth: f64,
}

impl Default for MeltingTrace {
    fn default() -> Self {
        Self {
            start_temperature: 580.0,
            end_temperature: 680.0,
            heating_rate: 0.5,
            sample_interval: 0.5,
            baseline_offset: 0.0,
            baseline_slope: 0.02,
            onset_temperature: 630.0,
            peak_width: 8.0,
            peak_depth: 5.0,
        }
    }
}

impl MeltingTrace {
    /// Signal at temperature `t`.
    pub fn signal_at(&self, t: f64) -> f64 {
        let baseline = self.baseline_offset + self.baseline_slope * (t - self.start_temperature);
        if t <= self.onset_temperature || self.peak_width <= 0.0 {
            return baseline;
        }
        // u^2 * e^(2 - 2u): zero with zero slope at onset, depth 1 at u = 1
        let u = (t - self.onset_temperature) / self.peak_width;
        baseline - self.peak_depth * u * u * (2.0 - 2.0 * u).exp()
    }

    /// Number of samples the run produces.
    pub fn len(&self) -> usize {
        if self.heating_rate <= 0.0 || self.sample_interval <= 0.0 {
            return 0;
        }
        let duration = (self.end_temperature - self.start_temperature) / self.heating_rate;
        if duration < 0.0 {
            return 0;
        }
        (duration / self.sample_interval).floor() as usize + 1
    }

    /// Whether the run produces no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Generate the samples of `trace`.
pub fn melting_trace(trace: &MeltingTrace) -> Vec<Sample> {
    (0..trace.len())
        .map(|i| {
            let time = i as f64 * trace.sample_interval;
            let temperature = trace.start_temperature + trace.heating_rate * time;
            Sample::new(time, temperature, trace.signal_at(temperature))
        })
        .collect()
}

/// Samples as raw rows, ready for [`DataIngestor`](crate::ingest::DataIngestor).
pub fn to_rows(samples: &[Sample]) -> Vec<RawRow> {
    samples
        .iter()
        .map(|s| {
            vec![
                RawValue::Number(s.time),
                RawValue::Number(s.temperature),
                RawValue::Number(s.signal),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_trace() {
        let trace = MeltingTrace::default();
        let samples = melting_trace(&trace);

        assert_eq!(samples.len(), 401);
        assert_eq!(samples[0].temperature, 580.0);
        assert!((samples[400].temperature - 680.0).abs() < 1e-9);
        assert!(samples.windows(2).all(|w| w[1].time > w[0].time));
    }

    #[test]
    fn test_dip_shape() {
        let trace = MeltingTrace::default();
        let baseline = |t: f64| trace.baseline_slope * (t - trace.start_temperature);

        assert_eq!(trace.signal_at(620.0), baseline(620.0));
        assert_eq!(trace.signal_at(630.0), baseline(630.0));
        assert!((trace.signal_at(638.0) - (baseline(638.0) - 5.0)).abs() < 1e-9);
        assert!(trace.signal_at(650.0) < baseline(650.0));
    }

    #[test]
    fn test_degenerate_trace_is_empty() {
        let trace = MeltingTrace {
            heating_rate: 0.0,
            ..MeltingTrace::default()
        };
        assert!(trace.is_empty());
        assert!(melting_trace(&trace).is_empty());
    }
}
