use std::f64::consts::PI;

use crate::config::CalculationModeConfig;
use crate::constants::BAND_REJECT_MAX_GAIN;
use crate::design::band::BandGeometry;
use crate::design::components::{
    linear_gain, require_gain_db, resolve_gain_resistors, resolve_rc,
};
use crate::design::{
    DerivedComponents, FilterSpec, QualitySource, SolvedComponents, Topology, TopologySolver,
};
use crate::error::{DesignError, Result};

/// Band-reject (twin-T notch) solver
///
/// Unity shape factor: `R = 1/(ωo·C)` with shunt arms R/2 and 2C. The
/// buffer is a non-inverting stage, `Rf = Ra·(A - 1)`, and the gain must
/// stay strictly below 2 (about 6.02 dB).
pub struct BandRejectSolver;

impl TopologySolver for BandRejectSolver {
    fn topology(&self) -> Topology {
        Topology::BandReject
    }

    fn solve(
        &self,
        spec: &FilterSpec,
        modes: &CalculationModeConfig,
    ) -> Result<SolvedComponents> {
        let gain_db = require_gain_db(spec)?;
        let gain = linear_gain(gain_db);
        if gain >= BAND_REJECT_MAX_GAIN {
            return Err(DesignError::GainOutOfRange {
                gain_db,
                reason: "band-reject designs require A < 2 (below 6.02 dB)",
            });
        }

        let band = BandGeometry::from_spec(spec, modes.band)?;
        let n = 1.0;
        let omega = 2.0 * PI * band.center;
        let (r, c) = resolve_rc(spec, modes.reference, 1.0 / omega)?;
        let (ra, rf) = resolve_gain_resistors(
            spec,
            modes.gain_resistor,
            gain - 1.0,
            gain_db,
            "a non-inverting gain stage needs at least 0 dB (A >= 1)",
        )?;

        Ok(SolvedComponents {
            topology: Topology::BandReject,
            frequency: band.center,
            gain,
            n,
            q: band.q,
            q_source: QualitySource::Bandwidth,
            r,
            c,
            ra,
            rf,
            band: Some(band),
            derived: DerivedComponents::TwinT {
                r_half: r / 2.0,
                c_double: 2.0 * c,
            },
        })
    }
}
