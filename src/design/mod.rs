//! Sallen-Key design solvers.
//!
//! One [`TopologySolver`] per topology maps a [`FilterSpec`] (SI units) and a
//! [`CalculationModeConfig`] to a full [`SolvedComponents`] set. The solvers
//! share the quadratic root selector, the band geometry and the R/C and
//! Ra/Rf resolution helpers.

pub mod band;
mod band_pass;
mod band_reject;
mod components;
mod high_pass;
mod low_pass;
pub mod quadratic;

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

use crate::config::CalculationModeConfig;
use crate::error::Result;
use crate::units::{self, Dimension, Unit};

pub use band::BandGeometry;
pub use band_pass::BandPassSolver;
pub use band_reject::BandRejectSolver;
pub use high_pass::HighPassSolver;
pub use low_pass::LowPassSolver;
pub use quadratic::Quadratic;

/// Filter topology
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Topology {
    BandPass,
    LowPass,
    HighPass,
    BandReject,
}

impl Topology {
    pub const ALL: [Topology; 4] = [
        Topology::BandPass,
        Topology::LowPass,
        Topology::HighPass,
        Topology::BandReject,
    ];

    /// The solver implementing this topology
    pub fn solver(self) -> &'static dyn TopologySolver {
        match self {
            Self::BandPass => &BandPassSolver,
            Self::LowPass => &LowPassSolver,
            Self::HighPass => &HighPassSolver,
            Self::BandReject => &BandRejectSolver,
        }
    }

    /// Run this topology's solver
    pub fn solve(
        self,
        spec: &FilterSpec,
        modes: &CalculationModeConfig,
    ) -> Result<SolvedComponents> {
        self.solver().solve(spec, modes)
    }

    /// Whether the topology is specified by a band (fo/BW or f1/f2)
    pub fn is_band(self) -> bool {
        matches!(self, Self::BandPass | Self::BandReject)
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BandPass => "band-pass",
            Self::LowPass => "low-pass",
            Self::HighPass => "high-pass",
            Self::BandReject => "band-reject",
        };
        f.write_str(name)
    }
}

/// Common interface of the four design solvers
pub trait TopologySolver {
    fn topology(&self) -> Topology;

    fn solve(&self, spec: &FilterSpec, modes: &CalculationModeConfig)
    -> Result<SolvedComponents>;
}

/// User-supplied design target, all values in SI base units
///
/// Which member of each either/or pair is read is decided by the
/// [`CalculationModeConfig`] passed alongside; the unread member may be left
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterSpec {
    /// Centre frequency (band topologies) or cutoff frequency (low/high-pass) in Hz
    pub frequency: Option<f64>,
    /// Bandwidth in Hz (centre/bandwidth mode)
    pub bandwidth: Option<f64>,
    /// Lower cutoff f1 in Hz (cutoff-pair mode)
    pub lower_cutoff: Option<f64>,
    /// Upper cutoff f2 in Hz (cutoff-pair mode)
    pub upper_cutoff: Option<f64>,
    /// Gain in dB
    pub gain_db: Option<f64>,
    /// Quality factor; low-pass only, Butterworth when absent
    pub quality_factor: Option<f64>,
    /// Reference capacitance in farads
    pub capacitance: Option<f64>,
    /// Reference resistance in ohms
    pub resistance: Option<f64>,
    /// Gain-setting resistor Ra in ohms
    pub ra: Option<f64>,
    /// Feedback resistor Rf in ohms
    pub rf: Option<f64>,
}

/// Where the quality factor of a design comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum QualitySource {
    /// Q = fo / BW
    Bandwidth,
    /// Q given as an input
    Specified,
    /// Fixed at 1/√2
    Butterworth,
}

/// Topology-specific component values beyond R, C, Ra and Rf
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DerivedComponents {
    None,
    /// Low-pass ground capacitor n·C
    ScaledCapacitor { n_c: f64 },
    /// High-pass ground resistor n·R
    ScaledResistor { n_r: f64 },
    /// Twin-T shunt arms R/2 and 2C
    TwinT { r_half: f64, c_double: f64 },
}

/// Output of a topology solver
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolvedComponents {
    pub topology: Topology,
    /// Centre or cutoff frequency in Hz
    pub frequency: f64,
    /// Linear gain A
    pub gain: f64,
    /// Shape factor (larger root of the design quadratic)
    pub n: f64,
    pub q: f64,
    pub q_source: QualitySource,
    pub r: f64,
    pub c: f64,
    pub ra: f64,
    pub rf: f64,
    /// Band edges for band-pass and band-reject designs
    pub band: Option<BandGeometry>,
    pub derived: DerivedComponents,
}

impl SolvedComponents {
    /// Angular centre/cutoff frequency in rad/s
    pub fn omega(&self) -> f64 {
        2.0 * PI * self.frequency
    }

    /// Gain in dB
    pub fn gain_db(&self) -> f64 {
        20.0 * self.gain.log10()
    }

    /// Characteristic frequencies: `fo`, plus `BW`, `f1` and `f2` for band designs
    pub fn frequency_values(&self) -> Vec<(&'static str, f64, Dimension)> {
        let mut values = vec![("fo", self.frequency, Dimension::Frequency)];
        if let Some(band) = self.band {
            values.push(("BW", band.bandwidth, Dimension::Frequency));
            values.push(("f1", band.lower_cutoff, Dimension::Frequency));
            values.push(("f2", band.upper_cutoff, Dimension::Frequency));
        }
        values
    }

    /// Named component values with their dimension, in display order
    pub fn component_values(&self) -> Vec<(&'static str, f64, Dimension)> {
        let mut values = vec![
            ("R", self.r, Dimension::Resistance),
            ("C", self.c, Dimension::Capacitance),
            ("Ra", self.ra, Dimension::Resistance),
            ("Rf", self.rf, Dimension::Resistance),
        ];
        match self.derived {
            DerivedComponents::None => {}
            DerivedComponents::ScaledCapacitor { n_c } => {
                values.push(("nC", n_c, Dimension::Capacitance));
            }
            DerivedComponents::ScaledResistor { n_r } => {
                values.push(("nR", n_r, Dimension::Resistance));
            }
            DerivedComponents::TwinT { r_half, c_double } => {
                values.push(("R/2", r_half, Dimension::Resistance));
                values.push(("2C", c_double, Dimension::Capacitance));
            }
        }
        values
    }

    /// Re-express a named frequency or component in another unit of its
    /// dimension (e.g. `fo` in rad/s).
    ///
    /// Returns `None` for an unknown name or a unit of the wrong dimension.
    pub fn display<U: Unit>(&self, name: &str, unit: U) -> Option<f64> {
        self.frequency_values()
            .into_iter()
            .chain(self.component_values())
            .find(|(component, _, dimension)| {
                *component == name && *dimension == U::DIMENSION
            })
            .map(|(_, value, _)| units::from_si(value, unit))
    }
}
