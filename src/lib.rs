//! Sallen-Key active filter design calculator.
//!
//! Given a design target (centre or cutoff frequency, bandwidth or cutoff
//! pair, gain, and one reference component), the solvers compute the
//! remaining resistor and capacitor values for band-pass, low-pass,
//! high-pass and twin-T band-reject topologies, then derive the transfer
//! function and its magnitude response.

pub mod calculator;
pub mod config;
pub mod constants;
pub mod design;
pub mod error;
pub mod output;
pub mod response;
pub mod units;

pub use calculator::{Calculation, Calculator, calculate};
pub use config::{CalculationModeConfig, DesignFile, SweepConfig};
pub use design::{FilterSpec, SolvedComponents, Topology};
pub use error::{DesignError, Result};
pub use response::{BodePoint, TransferFunction};
