//! Calculation modes and sweep configuration.
//!
//! Every topology form offers three either/or toggles: how the band is
//! specified, which of R/C is the reference component, and which of Ra/Rf
//! is given. They are carried as one immutable [`CalculationModeConfig`]
//! passed into the solver rather than held as UI state.
//!
//! A complete design can also be described in a TOML file:
//!
//! ```toml
//! topology = "band-pass"
//!
//! [spec]
//! fo = "1kHz"
//! bw = "200Hz"
//! gain_db = 26.0
//! c = "10nF"
//! ra = "1k"
//!
//! [sweep]
//! step_ratio = 1.1
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DECADES_ABOVE, DEFAULT_DECADES_BELOW, DEFAULT_STEP_RATIO};
use crate::design::{FilterSpec, Topology};
use crate::error::{DesignError, Result};
use crate::units::{Capacitance, Frequency, Resistance};

/// How the pass/stop band of a band topology is specified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BandMode {
    /// Centre frequency and bandwidth are given
    #[default]
    CenterBandwidth,
    /// Lower and upper cutoff frequencies are given
    CutoffPair,
}

/// Which component of the R/C pair is the reference value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceMode {
    /// Capacitance is given, resistance is derived
    #[default]
    Capacitor,
    /// Resistance is given, capacitance is derived
    Resistor,
}

/// Which resistor of the gain-setting pair is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GainResistorMode {
    /// Ra is given, Rf is derived
    #[default]
    Ra,
    /// Rf is given, Ra is derived
    Rf,
}

/// The three input-mode toggles of a calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationModeConfig {
    pub band: BandMode,
    pub reference: ReferenceMode,
    pub gain_resistor: GainResistorMode,
}

impl CalculationModeConfig {
    /// Derive the modes from which member of each either/or pair is populated.
    ///
    /// Supplying both members of a pair is rejected; supplying neither falls
    /// back to the default member, whose absence the solver then reports.
    pub fn infer(spec: &FilterSpec) -> Result<Self> {
        let band = match (
            spec.bandwidth.is_some(),
            spec.lower_cutoff.is_some() || spec.upper_cutoff.is_some(),
        ) {
            (true, true) => {
                return Err(DesignError::InvalidInput(
                    "give either a bandwidth or a cutoff pair, not both".to_string(),
                ));
            }
            (false, true) => BandMode::CutoffPair,
            _ => BandMode::CenterBandwidth,
        };

        let reference = match (spec.capacitance.is_some(), spec.resistance.is_some()) {
            (true, true) => {
                return Err(DesignError::InvalidInput(
                    "give either a reference capacitance or a reference resistance, not both"
                        .to_string(),
                ));
            }
            (false, true) => ReferenceMode::Resistor,
            _ => ReferenceMode::Capacitor,
        };

        let gain_resistor = match (spec.ra.is_some(), spec.rf.is_some()) {
            (true, true) => {
                return Err(DesignError::InvalidInput(
                    "give either Ra or Rf, not both".to_string(),
                ));
            }
            (false, true) => GainResistorMode::Rf,
            _ => GainResistorMode::Ra,
        };

        Ok(Self {
            band,
            reference,
            gain_resistor,
        })
    }
}

/// Frequency sweep used for the Bode plot
///
/// The sweep is geometric and spans `decades_below` decades under the
/// characteristic frequency to `decades_above` decades over it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Decades below the characteristic frequency
    pub decades_below: f64,
    /// Decades above the characteristic frequency
    pub decades_above: f64,
    /// Ratio between consecutive sample frequencies (must be > 1)
    pub step_ratio: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            decades_below: DEFAULT_DECADES_BELOW,
            decades_above: DEFAULT_DECADES_ABOVE,
            step_ratio: DEFAULT_STEP_RATIO,
        }
    }
}

impl SweepConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.step_ratio.is_finite() && self.step_ratio > 1.0) {
            return Err(DesignError::InvalidInput(format!(
                "sweep step ratio must be greater than 1, got {}",
                self.step_ratio
            )));
        }
        if !(self.decades_below.is_finite() && self.decades_below >= 0.0)
            || !(self.decades_above.is_finite() && self.decades_above >= 0.0)
        {
            return Err(DesignError::InvalidInput(
                "sweep decades must be finite and non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Input values of a design file, as quantity strings or SI numbers
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpecFile {
    pub fo: Option<Frequency>,
    pub bw: Option<Frequency>,
    pub f1: Option<Frequency>,
    pub f2: Option<Frequency>,
    pub gain_db: Option<f64>,
    pub q: Option<f64>,
    pub c: Option<Capacitance>,
    pub r: Option<Resistance>,
    pub ra: Option<Resistance>,
    pub rf: Option<Resistance>,
}

impl SpecFile {
    /// Convert to an SI [`FilterSpec`]
    pub fn to_spec(&self) -> FilterSpec {
        FilterSpec {
            frequency: self.fo.map(|q| q.si()),
            bandwidth: self.bw.map(|q| q.si()),
            lower_cutoff: self.f1.map(|q| q.si()),
            upper_cutoff: self.f2.map(|q| q.si()),
            gain_db: self.gain_db,
            quality_factor: self.q,
            capacitance: self.c.map(|q| q.si()),
            resistance: self.r.map(|q| q.si()),
            ra: self.ra.map(|q| q.si()),
            rf: self.rf.map(|q| q.si()),
        }
    }

    /// Reject values that populate both members of an either/or pair.
    pub fn check_pairs(&self) -> Result<()> {
        CalculationModeConfig::infer(&self.to_spec()).map(|_| ())
    }

    /// Whether any member of an either/or pair is populated
    pub fn gives_mode_pair(&self) -> bool {
        self.bw.is_some()
            || self.f1.is_some()
            || self.f2.is_some()
            || self.c.is_some()
            || self.r.is_some()
            || self.ra.is_some()
            || self.rf.is_some()
    }

    /// Lay `overrides` on top of these values.
    ///
    /// An override for one member of an either/or pair drops the other
    /// member; a single cutoff override keeps the other cutoff.
    pub fn overlay(&mut self, overrides: &SpecFile) {
        if overrides.fo.is_some() {
            self.fo = overrides.fo;
        }
        if overrides.bw.is_some() {
            self.bw = overrides.bw;
            self.f1 = None;
            self.f2 = None;
        }
        if overrides.f1.is_some() || overrides.f2.is_some() {
            self.f1 = overrides.f1.or(self.f1);
            self.f2 = overrides.f2.or(self.f2);
            self.bw = None;
        }
        if overrides.gain_db.is_some() {
            self.gain_db = overrides.gain_db;
        }
        if overrides.q.is_some() {
            self.q = overrides.q;
        }
        if overrides.c.is_some() {
            self.c = overrides.c;
            self.r = None;
        }
        if overrides.r.is_some() {
            self.r = overrides.r;
            self.c = None;
        }
        if overrides.ra.is_some() {
            self.ra = overrides.ra;
            self.rf = None;
        }
        if overrides.rf.is_some() {
            self.rf = overrides.rf;
            self.ra = None;
        }
    }
}

/// A complete design description loaded from TOML
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DesignFile {
    pub topology: Option<Topology>,
    #[serde(default)]
    pub modes: Option<CalculationModeConfig>,
    #[serde(default)]
    pub spec: SpecFile,
    #[serde(default)]
    pub sweep: SweepConfig,
}

impl DesignFile {
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply command-line overrides and settle the calculation modes.
    ///
    /// The file's `[modes]` table is kept only while the overrides leave
    /// every either/or pair alone; otherwise the modes are inferred from
    /// the merged values.
    pub fn resolve(&self, overrides: &SpecFile) -> Result<(FilterSpec, CalculationModeConfig)> {
        overrides.check_pairs()?;
        let mut merged = self.spec.clone();
        merged.overlay(overrides);
        let spec = merged.to_spec();
        let modes = match self.modes {
            Some(modes) if !overrides.gives_mode_pair() => modes,
            _ => CalculationModeConfig::infer(&spec)?,
        };
        Ok((spec, modes))
    }
}
