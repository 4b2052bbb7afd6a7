use serde::Serialize;

use crate::config::BandMode;
use crate::design::FilterSpec;
use crate::design::components::require_positive;
use crate::error::{DesignError, Result};

/// Centre frequency, bandwidth, Q and cutoff frequencies of a band design
///
/// The two cutoffs always satisfy `f1 · f2 = fo²` and `f2 - f1 = BW`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandGeometry {
    pub center: f64,
    pub bandwidth: f64,
    pub q: f64,
    pub lower_cutoff: f64,
    pub upper_cutoff: f64,
}

impl BandGeometry {
    pub fn from_center_bandwidth(center: f64, bandwidth: f64) -> Result<Self> {
        let center = require_positive("centre frequency", Some(center))?;
        let bandwidth = require_positive("bandwidth", Some(bandwidth))?;
        let q = center / bandwidth;
        let (lower_cutoff, upper_cutoff) = cutoff_frequencies(center, q);
        Ok(Self {
            center,
            bandwidth,
            q,
            lower_cutoff,
            upper_cutoff,
        })
    }

    /// `fo = √(f1·f2)`, `BW = f2 - f1`
    pub fn from_cutoffs(lower: f64, upper: f64) -> Result<Self> {
        let lower = require_positive("lower cutoff frequency", Some(lower))?;
        let upper = require_positive("upper cutoff frequency", Some(upper))?;
        if lower >= upper {
            return Err(DesignError::InvalidInput(format!(
                "lower cutoff ({lower} Hz) must be below upper cutoff ({upper} Hz)"
            )));
        }
        Self::from_center_bandwidth((lower * upper).sqrt(), upper - lower)
    }

    pub fn from_spec(spec: &FilterSpec, mode: BandMode) -> Result<Self> {
        match mode {
            BandMode::CenterBandwidth => Self::from_center_bandwidth(
                require_positive("centre frequency", spec.frequency)?,
                require_positive("bandwidth", spec.bandwidth)?,
            ),
            BandMode::CutoffPair => Self::from_cutoffs(
                require_positive("lower cutoff frequency", spec.lower_cutoff)?,
                require_positive("upper cutoff frequency", spec.upper_cutoff)?,
            ),
        }
    }
}

/// Cutoff frequencies `fo·(√(1 + 1/(4Q²)) ∓ 1/(2Q))`
pub fn cutoff_frequencies(center: f64, q: f64) -> (f64, f64) {
    let root = (1.0 + 1.0 / (4.0 * q * q)).sqrt();
    let offset = 1.0 / (2.0 * q);
    (center * (root - offset), center * (root + offset))
}
