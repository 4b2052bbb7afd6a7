use proptest::prelude::*;

use sallenkey::config::CalculationModeConfig;
use sallenkey::design::{FilterSpec, Quadratic, Topology};
use sallenkey::response::TransferFunction;
use sallenkey::units::{
    self, Capacitance, CapacitanceUnit, Frequency, FrequencyUnit, ResistanceUnit, Unit,
};

fn frequency_unit() -> impl Strategy<Value = FrequencyUnit> {
    prop_oneof![
        Just(FrequencyUnit::Hz),
        Just(FrequencyUnit::KHz),
        Just(FrequencyUnit::MHz),
        Just(FrequencyUnit::RadPerSecond),
    ]
}

fn resistance_unit() -> impl Strategy<Value = ResistanceUnit> {
    prop_oneof![
        Just(ResistanceUnit::Ohm),
        Just(ResistanceUnit::KiloOhm),
        Just(ResistanceUnit::MegaOhm),
    ]
}

fn capacitance_unit() -> impl Strategy<Value = CapacitanceUnit> {
    prop_oneof![
        Just(CapacitanceUnit::Farad),
        Just(CapacitanceUnit::Microfarad),
        Just(CapacitanceUnit::Nanofarad),
        Just(CapacitanceUnit::Picofarad),
    ]
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs())
}

/// Band-pass spec that is feasible by construction: A + 1 exceeds 2√2·Q.
fn feasible_band_pass() -> impl Strategy<Value = FilterSpec> {
    (10.0..50_000.0f64, 0.5..10.0f64, 0.1..20.0f64, 1e-10..1e-6f64).prop_map(
        |(frequency, q, margin, capacitance)| {
            let gain = 2.0 * std::f64::consts::SQRT_2 * q - 1.0 + margin;
            FilterSpec {
                frequency: Some(frequency),
                bandwidth: Some(frequency / q),
                gain_db: Some(20.0 * gain.log10()),
                capacitance: Some(capacitance),
                ra: Some(1000.0),
                ..FilterSpec::default()
            }
        },
    )
}

/// Feasible design for any topology, including both low-pass forms.
fn feasible_design() -> impl Strategy<Value = (Topology, FilterSpec)> {
    let base = |frequency: f64, gain_db: f64, capacitance: f64| FilterSpec {
        frequency: Some(frequency),
        gain_db: Some(gain_db),
        capacitance: Some(capacitance),
        ra: Some(1000.0),
        ..FilterSpec::default()
    };
    prop_oneof![
        feasible_band_pass().prop_map(|spec| (Topology::BandPass, spec)),
        (10.0..50_000.0f64, 0.5..40.0f64, 0.5..5.0f64, 1e-10..1e-6f64).prop_map(
            move |(frequency, gain_db, q, capacitance)| {
                let spec = FilterSpec {
                    quality_factor: Some(q),
                    ..base(frequency, gain_db, capacitance)
                };
                (Topology::LowPass, spec)
            }
        ),
        (10.0..50_000.0f64, 6.1..40.0f64, 1e-10..1e-6f64).prop_map(
            move |(frequency, gain_db, capacitance)| {
                (Topology::LowPass, base(frequency, gain_db, capacitance))
            }
        ),
        (10.0..50_000.0f64, 6.1..40.0f64, 1e-10..1e-6f64).prop_map(
            move |(frequency, gain_db, capacitance)| {
                (Topology::HighPass, base(frequency, gain_db, capacitance))
            }
        ),
        (10.0..50_000.0f64, 0.0..6.0f64, 1.0..20.0f64, 1e-10..1e-6f64).prop_map(
            move |(frequency, gain_db, q, capacitance)| {
                let spec = FilterSpec {
                    bandwidth: Some(frequency / q),
                    ..base(frequency, gain_db, capacitance)
                };
                (Topology::BandReject, spec)
            }
        ),
    ]
}

proptest! {
    #[test]
    fn unit_round_trip(value in 1e-3..1e6f64, f in frequency_unit(), r in resistance_unit(), c in capacitance_unit()) {
        prop_assert!(close(units::from_si(units::to_si(value, f), f), value));
        prop_assert!(close(units::from_si(units::to_si(value, r), r), value));
        prop_assert!(close(units::from_si(units::to_si(value, c), c), value));
    }

    #[test]
    fn quantity_string_matches_conversion(value in 1e-3..1e6f64, f in frequency_unit(), c in capacitance_unit()) {
        let frequency: Frequency = format!("{}{}", value, f.symbol()).parse().unwrap();
        prop_assert!(close(frequency.si(), units::to_si(value, f)));

        let capacitance: Capacitance = format!("{} {}", value, c.symbol()).parse().unwrap();
        prop_assert!(close(capacitance.si(), units::to_si(value, c)));
    }

    #[test]
    fn solve_is_deterministic((topology, spec) in feasible_design()) {
        let modes = CalculationModeConfig::default();
        let first = topology.solve(&spec, &modes).unwrap();
        let second = topology.solve(&spec, &modes).unwrap();
        prop_assert!(first.n > 0.0);
        prop_assert_eq!(first.topology, topology);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn band_pass_selects_larger_positive_root(spec in feasible_band_pass()) {
        let solved = Topology::BandPass
            .solve(&spec, &CalculationModeConfig::default())
            .unwrap();
        prop_assert!(solved.n > 0.0);

        let q = solved.q;
        let gain = solved.gain;
        let quadratic = Quadratic::new(1.0, 2.0 - (gain + 1.0).powi(2) / (2.0 * q * q), 1.0);
        let (low, high) = quadratic.roots().unwrap();
        prop_assert!(close(solved.n, low.max(high)));
        // Roots multiply to 1, so the larger one is at least 1
        prop_assert!(solved.n >= 1.0 - 1e-9);
    }

    #[test]
    fn band_pass_centre_gain(spec in feasible_band_pass()) {
        let solved = Topology::BandPass
            .solve(&spec, &CalculationModeConfig::default())
            .unwrap();
        let tf = TransferFunction::from_components(&solved);
        prop_assert!((tf.magnitude_db(solved.frequency) - spec.gain_db.unwrap()).abs() < 0.5);
    }

    #[test]
    fn notch_gain_limit(gain_db in -20.0..20.0f64) {
        let spec = FilterSpec {
            frequency: Some(1000.0),
            bandwidth: Some(100.0),
            gain_db: Some(gain_db),
            capacitance: Some(10e-9),
            ra: Some(1000.0),
            ..FilterSpec::default()
        };
        let result = Topology::BandReject.solve(&spec, &CalculationModeConfig::default());
        let gain = 10f64.powf(gain_db / 20.0);
        if gain >= 2.0 {
            let rejected = matches!(result, Err(sallenkey::DesignError::GainOutOfRange { .. }));
            prop_assert!(rejected);
        } else if gain >= 1.0 {
            prop_assert!(result.is_ok());
        }
    }
}
