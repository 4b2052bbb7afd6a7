use num_complex::Complex64;
use serde::Serialize;
use std::f64::consts::PI;

use crate::constants::MIN_MAGNITUDE;
use crate::design::{QualitySource, SolvedComponents, Topology};

/// Second-order transfer function `H(s) = N(s) / D(s)`
///
/// Coefficients are stored highest power first (`[s², s, 1]`); the
/// denominator is monic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransferFunction {
    pub topology: Topology,
    pub numerator: [f64; 3],
    pub denominator: [f64; 3],
}

impl TransferFunction {
    /// Derive the coefficients from solved component values.
    ///
    /// Band-pass and Q-specified low-pass use the circuit closed forms in
    /// R, C, n and Rf/Ra. Designs whose Q is fixed at the Butterworth value,
    /// and the notch, are written in canonical form from
    /// ωo (recomputed from R, C and n), Q and A.
    pub fn from_components(solved: &SolvedComponents) -> Self {
        let n = solved.n;
        let rc = solved.r * solved.c;
        let ratio = solved.rf / solved.ra;

        let (numerator, denominator) = match (solved.topology, solved.q_source) {
            (Topology::BandPass, _) => {
                let k = 1.0 + ratio;
                (
                    [0.0, k / (n * rc), 0.0],
                    [1.0, (2.0 * n + 1.0 - ratio) / (n * rc), 2.0 / (n * rc * rc)],
                )
            }
            (Topology::LowPass, QualitySource::Specified) => {
                let constant = 1.0 / (n * rc * rc);
                (
                    [0.0, 0.0, constant * (1.0 + ratio)],
                    [1.0, (2.0 * n - ratio) / (n * rc), constant],
                )
            }
            (Topology::LowPass, _) => {
                let omega = 1.0 / (rc * n.sqrt());
                (
                    [0.0, 0.0, solved.gain * omega * omega],
                    canonical_denominator(omega, solved.q),
                )
            }
            (Topology::HighPass, _) => {
                let omega = 1.0 / (rc * n.sqrt());
                (
                    [solved.gain, 0.0, 0.0],
                    canonical_denominator(omega, solved.q),
                )
            }
            (Topology::BandReject, _) => {
                let omega = 1.0 / rc;
                (
                    [solved.gain, 0.0, solved.gain * omega * omega],
                    canonical_denominator(omega, solved.q),
                )
            }
        };

        Self {
            topology: solved.topology,
            numerator,
            denominator,
        }
    }

    /// Evaluate `H(s)` at a complex frequency
    pub fn evaluate(&self, s: Complex64) -> Complex64 {
        polynomial(&self.numerator, s) / polynomial(&self.denominator, s)
    }

    /// `H(jω)` at a frequency in Hz
    pub fn response_at(&self, frequency_hz: f64) -> Complex64 {
        self.evaluate(Complex64::new(0.0, 2.0 * PI * frequency_hz))
    }

    /// `20·log10|H(jω)|`, floored at [`MIN_MAGNITUDE`]
    pub fn magnitude_db(&self, frequency_hz: f64) -> f64 {
        20.0 * self.response_at(frequency_hz).norm().max(MIN_MAGNITUDE).log10()
    }

    /// Undamped natural frequency `√(a0/a2)/2π` in Hz
    pub fn natural_frequency(&self) -> f64 {
        (self.denominator[2] / self.denominator[0]).sqrt() / (2.0 * PI)
    }

    /// Plain-text rendering with the numeric coefficients substituted
    pub fn symbolic(&self) -> String {
        format!(
            "H(s) = ({}) / ({})",
            render_polynomial(&self.numerator, "s^2"),
            render_polynomial(&self.denominator, "s^2")
        )
    }

    /// LaTeX rendering with the numeric coefficients substituted
    pub fn latex(&self) -> String {
        format!(
            "H(s) = \\frac{{{}}}{{{}}}",
            render_polynomial(&self.numerator, "s^{2}"),
            render_polynomial(&self.denominator, "s^{2}")
        )
    }
}

fn canonical_denominator(omega: f64, q: f64) -> [f64; 3] {
    [1.0, omega / q, omega * omega]
}

fn polynomial(coefficients: &[f64; 3], s: Complex64) -> Complex64 {
    (s * coefficients[0] + coefficients[1]) * s + coefficients[2]
}

fn format_coefficient(value: f64) -> String {
    format!("{:.3e}", value)
}

fn render_polynomial(coefficients: &[f64; 3], square: &str) -> String {
    let mut rendered = String::new();
    for (coefficient, power) in coefficients.iter().zip([square, "s", ""]) {
        if *coefficient == 0.0 {
            continue;
        }
        let magnitude = coefficient.abs();
        let term = match (power, magnitude == 1.0) {
            ("", _) => format_coefficient(magnitude),
            (power, true) => power.to_string(),
            (power, false) => format!("{}{}", format_coefficient(magnitude), power),
        };
        match (rendered.is_empty(), *coefficient < 0.0) {
            (true, false) => rendered.push_str(&term),
            (true, true) => rendered.push_str(&format!("-{term}")),
            (false, false) => rendered.push_str(&format!(" + {term}")),
            (false, true) => rendered.push_str(&format!(" - {term}")),
        }
    }
    if rendered.is_empty() {
        rendered.push('0');
    }
    rendered
}
