use std::f64::consts::PI;

use crate::config::CalculationModeConfig;
use crate::constants::BUTTERWORTH_Q;
use crate::design::components::{
    linear_gain, require_gain_db, require_positive, resolve_gain_resistors, resolve_rc,
};
use crate::design::quadratic::{Quadratic, select_shape_factor};
use crate::design::{
    DerivedComponents, FilterSpec, QualitySource, SolvedComponents, Topology, TopologySolver,
};
use crate::error::Result;

/// Sallen-Key high-pass solver
///
/// Butterworth response (Q = 1/√2) with equal capacitors C and resistors
/// R and n·R, where `n` is the larger root of `n² + (2 - A²)·n + 1 = 0`.
/// Real roots need A ≥ 2.
pub struct HighPassSolver;

impl TopologySolver for HighPassSolver {
    fn topology(&self) -> Topology {
        Topology::HighPass
    }

    fn solve(
        &self,
        spec: &FilterSpec,
        modes: &CalculationModeConfig,
    ) -> Result<SolvedComponents> {
        let frequency = require_positive("cutoff frequency", spec.frequency)?;
        let gain_db = require_gain_db(spec)?;
        let gain = linear_gain(gain_db);

        let quadratic = Quadratic::new(1.0, 2.0 - gain * gain, 1.0);
        let n = select_shape_factor(
            &quadratic,
            Topology::HighPass,
            "raise the gain to at least 6.02 dB (A >= 2)",
        )?;

        let omega = 2.0 * PI * frequency;
        let (r, c) = resolve_rc(spec, modes.reference, 1.0 / (omega * n.sqrt()))?;
        let (ra, rf) = resolve_gain_resistors(
            spec,
            modes.gain_resistor,
            2.0 * n + 1.0,
            gain_db,
            "the feedback divider would need a negative Rf",
        )?;

        Ok(SolvedComponents {
            topology: Topology::HighPass,
            frequency,
            gain,
            n,
            q: BUTTERWORTH_Q,
            q_source: QualitySource::Butterworth,
            r,
            c,
            ra,
            rf,
            band: None,
            derived: DerivedComponents::ScaledResistor { n_r: n * r },
        })
    }
}
