use serde::Serialize;

use crate::config::SweepConfig;
use crate::constants::MAX_SWEEP_POINTS;
use crate::design::SolvedComponents;
use crate::error::{DesignError, Result};
use crate::response::TransferFunction;

/// One sample of the magnitude response
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodePoint {
    pub frequency_hz: f64,
    pub magnitude_db: f64,
}

/// Geometric frequency sweep `low, low·r, low·r², … ≤ high`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyRange {
    pub low: f64,
    pub high: f64,
    pub step_ratio: f64,
}

impl FrequencyRange {
    pub fn new(low: f64, high: f64, step_ratio: f64) -> Result<Self> {
        if !(low.is_finite() && low > 0.0 && high.is_finite() && high >= low) {
            return Err(DesignError::InvalidInput(format!(
                "invalid sweep range {low} Hz .. {high} Hz"
            )));
        }
        if !(step_ratio.is_finite() && step_ratio > 1.0) {
            return Err(DesignError::InvalidInput(format!(
                "sweep step ratio must be greater than 1, got {step_ratio}"
            )));
        }
        let range = Self {
            low,
            high,
            step_ratio,
        };
        if range.point_count() > MAX_SWEEP_POINTS {
            return Err(DesignError::InvalidInput(format!(
                "sweep would produce {} points (limit {})",
                range.point_count(),
                MAX_SWEEP_POINTS
            )));
        }
        Ok(range)
    }

    /// Range spanning the configured decades around the design's
    /// characteristic frequencies (cutoff, or f1..f2 for band designs).
    pub fn around(solved: &SolvedComponents, sweep: &SweepConfig) -> Result<Self> {
        sweep.validate()?;
        let (low_edge, high_edge) = match solved.band {
            Some(band) => (
                band.lower_cutoff.min(solved.frequency),
                band.upper_cutoff.max(solved.frequency),
            ),
            None => (solved.frequency, solved.frequency),
        };
        Self::new(
            low_edge / 10f64.powf(sweep.decades_below),
            high_edge * 10f64.powf(sweep.decades_above),
            sweep.step_ratio,
        )
    }

    /// Number of sample frequencies
    pub fn point_count(&self) -> usize {
        let steps = (self.high / self.low).ln() / self.step_ratio.ln();
        // Tolerate rounding when `high` sits exactly on a step
        (steps + 1e-9).floor() as usize + 1
    }

    pub fn frequencies(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.point_count()).map(move |k| self.low * self.step_ratio.powi(k as i32))
    }
}

/// Evaluate the magnitude response over a frequency range.
pub fn evaluate(tf: &TransferFunction, range: &FrequencyRange) -> Vec<BodePoint> {
    range
        .frequencies()
        .map(|frequency_hz| BodePoint {
            frequency_hz,
            magnitude_db: tf.magnitude_db(frequency_hz),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::Topology;
    use approx::assert_relative_eq;

    #[test]
    fn test_range_includes_exact_end() {
        let range = FrequencyRange::new(1.0, 1000.0, 10.0).unwrap();
        assert_eq!(range.point_count(), 4);
        let freqs: Vec<f64> = range.frequencies().collect();
        assert_relative_eq!(freqs[3], 1000.0);
    }

    #[test]
    fn test_range_is_geometric_and_bounded() {
        let range = FrequencyRange::new(10.0, 100_000.0, 1.05).unwrap();
        let freqs: Vec<f64> = range.frequencies().collect();
        assert_eq!(freqs.len(), range.point_count());
        assert!(freqs.windows(2).all(|w| (w[1] / w[0] - 1.05).abs() < 1e-9));
        assert!(*freqs.last().unwrap() <= 100_000.0 * (1.0 + 1e-9));
        assert!(freqs.len() > 100 && freqs.len() < 300);
    }

    #[test]
    fn test_invalid_ranges() {
        assert!(FrequencyRange::new(0.0, 100.0, 1.1).is_err());
        assert!(FrequencyRange::new(100.0, 10.0, 1.1).is_err());
        assert!(FrequencyRange::new(10.0, 100.0, 1.0).is_err());
        assert!(FrequencyRange::new(1.0, 1e12, 1.000_000_1).is_err());
    }

    #[test]
    fn test_evaluate_flat_response() {
        let tf = TransferFunction {
            topology: Topology::LowPass,
            numerator: [1.0, 0.0, 0.0],
            denominator: [1.0, 0.0, 0.0],
        };
        let range = FrequencyRange::new(10.0, 1000.0, 1.1).unwrap();
        let points = evaluate(&tf, &range);
        assert_eq!(points.len(), range.point_count());
        for point in &points {
            assert_relative_eq!(point.magnitude_db, 0.0, epsilon = 1e-12);
        }
    }
}
