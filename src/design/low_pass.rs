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

/// Sallen-Key low-pass solver
///
/// Equal resistors R, feedback capacitor C and ground capacitor n·C, so
/// `ωo = 1 / (R·C·√n)` and the DC gain is `K = 1 + Rf/Ra = A`.
///
/// Two design quadratics are in use:
/// - Q given: `4n² + (4 - 4A - 1/Q²)·n + (1 - A)² = 0`, from
///   `1/Q = (2n + 1 - A) / √n`
/// - Q absent: `n² + (2 - A²)·n + 1 = 0` with Q fixed at 1/√2
pub struct LowPassSolver;

impl TopologySolver for LowPassSolver {
    fn topology(&self) -> Topology {
        Topology::LowPass
    }

    fn solve(
        &self,
        spec: &FilterSpec,
        modes: &CalculationModeConfig,
    ) -> Result<SolvedComponents> {
        let frequency = require_positive("cutoff frequency", spec.frequency)?;
        let gain_db = require_gain_db(spec)?;
        let gain = linear_gain(gain_db);

        let (quadratic, q, q_source, hint) = match spec.quality_factor {
            Some(q) => {
                let q = require_positive("quality factor", Some(q))?;
                (
                    Quadratic::new(
                        4.0,
                        4.0 - 4.0 * gain - 1.0 / (q * q),
                        1.0 - 2.0 * gain + gain * gain,
                    ),
                    q,
                    QualitySource::Specified,
                    "raise the gain or lower Q; this design needs A >= 1 - 1/(8*Q^2)",
                )
            }
            None => (
                Quadratic::new(1.0, 2.0 - gain * gain, 1.0),
                BUTTERWORTH_Q,
                QualitySource::Butterworth,
                "raise the gain to at least 6.02 dB (A >= 2) or give Q explicitly",
            ),
        };
        let n = select_shape_factor(&quadratic, Topology::LowPass, hint)?;

        let omega = 2.0 * PI * frequency;
        let (r, c) = resolve_rc(spec, modes.reference, 1.0 / (omega * n.sqrt()))?;
        let (ra, rf) = resolve_gain_resistors(
            spec,
            modes.gain_resistor,
            gain - 1.0,
            gain_db,
            "a non-inverting gain stage needs at least 0 dB (A >= 1)",
        )?;

        Ok(SolvedComponents {
            topology: Topology::LowPass,
            frequency,
            gain,
            n,
            q,
            q_source,
            r,
            c,
            ra,
            rf,
            band: None,
            derived: DerivedComponents::ScaledCapacitor { n_c: n * c },
        })
    }
}
