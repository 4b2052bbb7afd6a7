use std::f64::consts::PI;

use crate::config::CalculationModeConfig;
use crate::design::band::BandGeometry;
use crate::design::components::{
    linear_gain, require_gain_db, resolve_gain_resistors, resolve_rc,
};
use crate::design::quadratic::{Quadratic, select_shape_factor};
use crate::design::{
    DerivedComponents, FilterSpec, QualitySource, SolvedComponents, Topology, TopologySolver,
};
use crate::error::Result;

/// Sallen-Key band-pass solver
///
/// Circuit relations with `K = 1 + Rf/Ra`:
/// - `ωo = √(2/n) / (R·C)`
/// - `Q = √(2n) / (2n + 2 - K)`
/// - centre gain `A = K / (2n + 2 - K)`
///
/// Eliminating `K` gives the design quadratic
/// `n² + (2 - (A+1)²/(2Q²))·n + 1 = 0`, which has real roots only when
/// `A + 1 ≥ 2√2·Q`.
pub struct BandPassSolver;

impl TopologySolver for BandPassSolver {
    fn topology(&self) -> Topology {
        Topology::BandPass
    }

    fn solve(
        &self,
        spec: &FilterSpec,
        modes: &CalculationModeConfig,
    ) -> Result<SolvedComponents> {
        let band = BandGeometry::from_spec(spec, modes.band)?;
        let gain_db = require_gain_db(spec)?;
        let gain = linear_gain(gain_db);
        let q = band.q;

        let quadratic = Quadratic::new(1.0, 2.0 - (gain + 1.0).powi(2) / (2.0 * q * q), 1.0);
        let n = select_shape_factor(
            &quadratic,
            Topology::BandPass,
            "raise the gain or widen the bandwidth; band-pass needs A + 1 >= 2*sqrt(2)*Q",
        )?;

        let omega = 2.0 * PI * band.center;
        let (r, c) = resolve_rc(spec, modes.reference, (2.0 / n).sqrt() / omega)?;

        let ratio = (2.0 * n + 1.0) - (2.0 * n).sqrt() / q;
        let (ra, rf) = resolve_gain_resistors(
            spec,
            modes.gain_resistor,
            ratio,
            gain_db,
            "the feedback divider would need a negative Rf; raise the gain",
        )?;

        Ok(SolvedComponents {
            topology: Topology::BandPass,
            frequency: band.center,
            gain,
            n,
            q,
            q_source: QualitySource::Bandwidth,
            r,
            c,
            ra,
            rf,
            band: Some(band),
            derived: DerivedComponents::None,
        })
    }
}
