//! Numeric constants for filter design and response evaluation
//!
//! These constants define fixed design targets and the floors used to keep
//! the frequency response finite at transmission zeros.

use std::f64::consts::FRAC_1_SQRT_2;

/// Quality factor of a second-order Butterworth response (1/√2).
pub const BUTTERWORTH_Q: f64 = FRAC_1_SQRT_2;

/// Band-reject gain stages must stay strictly below this linear gain.
pub const BAND_REJECT_MAX_GAIN: f64 = 2.0;

/// Default number of decades swept below the characteristic frequency.
pub const DEFAULT_DECADES_BELOW: f64 = 2.0;

/// Default number of decades swept above the characteristic frequency.
pub const DEFAULT_DECADES_ABOVE: f64 = 2.0;

/// Default geometric step between consecutive sweep frequencies.
pub const DEFAULT_STEP_RATIO: f64 = 1.05;

/// Smallest magnitude converted to dB. A notch evaluated exactly at its zero
/// reports this floor (-240 dB) instead of negative infinity.
pub const MIN_MAGNITUDE: f64 = 1e-12;

/// Upper bound on sweep length so a tiny step ratio cannot allocate unbounded memory.
pub const MAX_SWEEP_POINTS: usize = 100_000;
