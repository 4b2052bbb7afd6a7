//! Input validation and the given-vs-derived resolution shared by all solvers.

use crate::config::{GainResistorMode, ReferenceMode};
use crate::design::FilterSpec;
use crate::error::{DesignError, Result};

pub(crate) fn require_positive(name: &str, value: Option<f64>) -> Result<f64> {
    match value {
        None => Err(DesignError::InvalidInput(format!("{name} is required"))),
        Some(v) if v.is_finite() && v > 0.0 => Ok(v),
        Some(v) => Err(DesignError::InvalidInput(format!(
            "{name} must be a positive number, got {v}"
        ))),
    }
}

pub(crate) fn require_gain_db(spec: &FilterSpec) -> Result<f64> {
    match spec.gain_db {
        Some(gain_db) if gain_db.is_finite() => Ok(gain_db),
        Some(gain_db) => Err(DesignError::InvalidInput(format!(
            "gain must be a finite number of dB, got {gain_db}"
        ))),
        None => Err(DesignError::InvalidInput("gain (dB) is required".to_string())),
    }
}

/// `A = 10^(dB/20)`
pub(crate) fn linear_gain(gain_db: f64) -> f64 {
    10f64.powf(gain_db / 20.0)
}

/// Resolve the R/C pair from the product `R·C = time_constant`.
///
/// Returns `(r, c)`.
pub(crate) fn resolve_rc(
    spec: &FilterSpec,
    mode: ReferenceMode,
    time_constant: f64,
) -> Result<(f64, f64)> {
    match mode {
        ReferenceMode::Capacitor => {
            let c = require_positive("reference capacitance", spec.capacitance)?;
            Ok((time_constant / c, c))
        }
        ReferenceMode::Resistor => {
            let r = require_positive("reference resistance", spec.resistance)?;
            Ok((r, time_constant / r))
        }
    }
}

/// Resolve the Ra/Rf pair from the ratio `Rf / Ra`.
///
/// A negative ratio is not realizable, and a zero ratio leaves Ra
/// undetermined when Rf is the given value. Returns `(ra, rf)`.
pub(crate) fn resolve_gain_resistors(
    spec: &FilterSpec,
    mode: GainResistorMode,
    ratio: f64,
    gain_db: f64,
    reason: &'static str,
) -> Result<(f64, f64)> {
    if !(ratio >= 0.0) {
        return Err(DesignError::GainOutOfRange { gain_db, reason });
    }
    match mode {
        GainResistorMode::Ra => {
            let ra = require_positive("Ra", spec.ra)?;
            Ok((ra, ra * ratio))
        }
        GainResistorMode::Rf => {
            let rf = require_positive("Rf", spec.rf)?;
            if ratio == 0.0 {
                return Err(DesignError::GainOutOfRange {
                    gain_db,
                    reason: "Ra cannot be derived from Rf at unity gain; give Ra instead",
                });
            }
            Ok((rf / ratio, rf))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_require_positive() {
        assert_eq!(require_positive("x", Some(2.0)), Ok(2.0));
        assert!(require_positive("x", None).is_err());
        assert!(require_positive("x", Some(0.0)).is_err());
        assert!(require_positive("x", Some(-1.0)).is_err());
        assert!(require_positive("x", Some(f64::NAN)).is_err());
        assert!(require_positive("x", Some(f64::INFINITY)).is_err());
    }

    #[test]
    fn test_missing_gain_differs_from_non_finite_gain() {
        let missing = FilterSpec::default();
        match require_gain_db(&missing) {
            Err(DesignError::InvalidInput(message)) => assert!(message.contains("required")),
            other => panic!("unexpected result: {other:?}"),
        }

        let not_a_number = FilterSpec {
            gain_db: Some(f64::NAN),
            ..FilterSpec::default()
        };
        match require_gain_db(&not_a_number) {
            Err(DesignError::InvalidInput(message)) => assert!(message.contains("finite")),
            other => panic!("unexpected result: {other:?}"),
        }

        let given = FilterSpec {
            gain_db: Some(-3.0),
            ..FilterSpec::default()
        };
        assert_eq!(require_gain_db(&given), Ok(-3.0));
    }

    #[test]
    fn test_linear_gain() {
        assert_relative_eq!(linear_gain(20.0), 10.0);
        assert_relative_eq!(linear_gain(0.0), 1.0);
        assert_relative_eq!(linear_gain(-20.0), 0.1);
    }

    #[test]
    fn test_resolve_rc_both_directions() {
        let spec = FilterSpec {
            capacitance: Some(10e-9),
            resistance: Some(20e3),
            ..FilterSpec::default()
        };
        let (r, c) = resolve_rc(&spec, ReferenceMode::Capacitor, 1e-4).unwrap();
        assert_relative_eq!(r, 10e3, max_relative = 1e-12);
        assert_eq!(c, 10e-9);

        let (r, c) = resolve_rc(&spec, ReferenceMode::Resistor, 1e-4).unwrap();
        assert_eq!(r, 20e3);
        assert_relative_eq!(c, 5e-9, max_relative = 1e-12);
    }

    #[test]
    fn test_resolve_gain_resistors() {
        let spec = FilterSpec {
            ra: Some(1000.0),
            rf: Some(9000.0),
            ..FilterSpec::default()
        };
        let (ra, rf) = resolve_gain_resistors(&spec, GainResistorMode::Ra, 9.0, 20.0, "").unwrap();
        assert_eq!((ra, rf), (1000.0, 9000.0));

        let (ra, rf) = resolve_gain_resistors(&spec, GainResistorMode::Rf, 9.0, 20.0, "").unwrap();
        assert_relative_eq!(ra, 1000.0);
        assert_eq!(rf, 9000.0);
    }

    #[test]
    fn test_negative_ratio_is_gain_out_of_range() {
        let spec = FilterSpec {
            ra: Some(1000.0),
            ..FilterSpec::default()
        };
        assert!(matches!(
            resolve_gain_resistors(&spec, GainResistorMode::Ra, -0.5, -6.0, "too low"),
            Err(DesignError::GainOutOfRange { .. })
        ));
    }

    #[test]
    fn test_unity_ratio_needs_ra() {
        let spec = FilterSpec {
            ra: Some(1000.0),
            rf: Some(1000.0),
            ..FilterSpec::default()
        };
        let (ra, rf) = resolve_gain_resistors(&spec, GainResistorMode::Ra, 0.0, 0.0, "").unwrap();
        assert_eq!((ra, rf), (1000.0, 0.0));
        assert!(matches!(
            resolve_gain_resistors(&spec, GainResistorMode::Rf, 0.0, 0.0, ""),
            Err(DesignError::GainOutOfRange { .. })
        ));
    }
}
