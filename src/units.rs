//! Unit normalization for frequency, resistance and capacitance
//!
//! The solver works exclusively in SI base units (hertz, ohms, farads).
//! Conversions to and from the engineering units offered by the input forms
//! live here, together with quantity-string parsing (`"10nF"`, `"4.7k"`,
//! `"1.5 kHz"`) and the display helper used by the result formatters.
//!
//! # Example
//! ```
//! use sallenkey::units::{self, CapacitanceUnit, Capacitance};
//!
//! let farads = units::to_si(10.0, CapacitanceUnit::Nanofarad);
//! assert!((farads - 10e-9).abs() < 1e-18);
//!
//! let c: Capacitance = "10nF".parse().unwrap();
//! assert!((c.si() - 10e-9).abs() < 1e-18);
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::f64::consts::PI;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// Physical dimension of a quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Frequency,
    Resistance,
    Capacitance,
}

/// An engineering unit of one dimension.
pub trait Unit: Copy + fmt::Debug + PartialEq + 'static {
    const DIMENSION: Dimension;

    /// Multiplier taking a value in this unit to the SI base unit.
    fn scale(self) -> f64;

    /// Printable symbol, e.g. `"kHz"`.
    fn symbol(self) -> &'static str;

    /// Resolve a (lower-cased) suffix such as `"k"` or `"khz"`.
    fn from_suffix(suffix: &str) -> Option<Self>;

    /// Unit the result display picks for an SI value.
    fn display_unit(value_si: f64) -> Self;
}

/// Convert `value` expressed in `unit` to the SI base unit.
pub fn to_si<U: Unit>(value: f64, unit: U) -> f64 {
    value * unit.scale()
}

/// Convert an SI value to `unit`.
pub fn from_si<U: Unit>(value_si: f64, unit: U) -> f64 {
    value_si / unit.scale()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrequencyUnit {
    #[serde(rename = "Hz")]
    Hz,
    #[serde(rename = "kHz")]
    KHz,
    #[serde(rename = "MHz")]
    MHz,
    /// Angular frequency; only chosen explicitly, never by the result display
    #[serde(rename = "rad/s")]
    RadPerSecond,
}

impl Unit for FrequencyUnit {
    const DIMENSION: Dimension = Dimension::Frequency;

    fn scale(self) -> f64 {
        match self {
            Self::Hz => 1.0,
            Self::KHz => 1e3,
            Self::MHz => 1e6,
            Self::RadPerSecond => 1.0 / (2.0 * PI),
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::Hz => "Hz",
            Self::KHz => "kHz",
            Self::MHz => "MHz",
            Self::RadPerSecond => "rad/s",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "" | "hz" => Some(Self::Hz),
            "k" | "khz" => Some(Self::KHz),
            "m" | "mhz" => Some(Self::MHz),
            "rad/s" | "rad" => Some(Self::RadPerSecond),
            _ => None,
        }
    }

    fn display_unit(value_si: f64) -> Self {
        let magnitude = value_si.abs();
        if magnitude < 1e3 {
            Self::Hz
        } else if magnitude < 1e6 {
            Self::KHz
        } else {
            Self::MHz
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResistanceUnit {
    #[serde(rename = "Ω")]
    Ohm,
    #[serde(rename = "kΩ")]
    KiloOhm,
    #[serde(rename = "MΩ")]
    MegaOhm,
}

impl Unit for ResistanceUnit {
    const DIMENSION: Dimension = Dimension::Resistance;

    fn scale(self) -> f64 {
        match self {
            Self::Ohm => 1.0,
            Self::KiloOhm => 1e3,
            Self::MegaOhm => 1e6,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::Ohm => "Ω",
            Self::KiloOhm => "kΩ",
            Self::MegaOhm => "MΩ",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "" | "r" | "ω" | "ohm" | "ohms" => Some(Self::Ohm),
            "k" | "kω" | "kohm" | "kohms" => Some(Self::KiloOhm),
            "m" | "meg" | "mω" | "mohm" | "mohms" => Some(Self::MegaOhm),
            _ => None,
        }
    }

    fn display_unit(value_si: f64) -> Self {
        let magnitude = value_si.abs();
        if magnitude < 1e3 {
            Self::Ohm
        } else if magnitude < 1e6 {
            Self::KiloOhm
        } else {
            Self::MegaOhm
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapacitanceUnit {
    #[serde(rename = "F")]
    Farad,
    #[serde(rename = "µF")]
    Microfarad,
    #[serde(rename = "nF")]
    Nanofarad,
    #[serde(rename = "pF")]
    Picofarad,
}

impl Unit for CapacitanceUnit {
    const DIMENSION: Dimension = Dimension::Capacitance;

    fn scale(self) -> f64 {
        match self {
            Self::Farad => 1.0,
            Self::Microfarad => 1e-6,
            Self::Nanofarad => 1e-9,
            Self::Picofarad => 1e-12,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::Farad => "F",
            Self::Microfarad => "µF",
            Self::Nanofarad => "nF",
            Self::Picofarad => "pF",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "" | "f" => Some(Self::Farad),
            "u" | "uf" | "µ" | "µf" | "μ" | "μf" => Some(Self::Microfarad),
            "n" | "nf" => Some(Self::Nanofarad),
            "p" | "pf" => Some(Self::Picofarad),
            _ => None,
        }
    }

    // Same thresholds as the result panel: pF below 1 nF, nF below 1 µF.
    fn display_unit(value_si: f64) -> Self {
        let magnitude = value_si.abs();
        if magnitude < 1e-9 {
            Self::Picofarad
        } else if magnitude < 1e-6 {
            Self::Nanofarad
        } else {
            Self::Microfarad
        }
    }
}

/// Format an SI value in the unit the result display would choose,
/// with two decimals.
pub fn format_si<U: Unit>(value_si: f64) -> String {
    format_in(value_si, U::display_unit(value_si))
}

/// Format an SI value in a chosen unit, with two decimals.
pub fn format_in<U: Unit>(value_si: f64, unit: U) -> String {
    format!("{:.2} {}", from_si(value_si, unit), unit.symbol())
}

/// Format an SI value of the given dimension.
pub fn format_dimension(value_si: f64, dimension: Dimension) -> String {
    match dimension {
        Dimension::Frequency => format_si::<FrequencyUnit>(value_si),
        Dimension::Resistance => format_si::<ResistanceUnit>(value_si),
        Dimension::Capacitance => format_si::<CapacitanceUnit>(value_si),
    }
}

/// A parsed physical quantity, stored in SI base units.
///
/// # Parsing formats
/// - `1500` - bare number, already SI
/// - `1.5k`, `1.5kHz`, `1.5 kHz` - with a unit or prefix suffix
/// - `10n`, `10nF`, `4.7uF`, `4.7µF` - capacitances
/// - `4.7k`, `4.7kΩ`, `1M`, `220ohm` - resistances
pub struct Quantity<U: Unit> {
    value_si: f64,
    unit: PhantomData<U>,
}

pub type Frequency = Quantity<FrequencyUnit>;
pub type Resistance = Quantity<ResistanceUnit>;
pub type Capacitance = Quantity<CapacitanceUnit>;

impl<U: Unit> Quantity<U> {
    pub fn from_si(value_si: f64) -> Self {
        Self {
            value_si,
            unit: PhantomData,
        }
    }

    pub fn new(value: f64, unit: U) -> Self {
        Self::from_si(to_si(value, unit))
    }

    pub fn si(&self) -> f64 {
        self.value_si
    }
}

impl<U: Unit> Clone for Quantity<U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<U: Unit> Copy for Quantity<U> {}

impl<U: Unit> PartialEq for Quantity<U> {
    fn eq(&self, other: &Self) -> bool {
        self.value_si == other.value_si
    }
}

impl<U: Unit> fmt::Debug for Quantity<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quantity({:?} {:?})", self.value_si, U::DIMENSION)
    }
}

impl<U: Unit> fmt::Display for Quantity<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_si::<U>(self.value_si))
    }
}

/// Split `"10nF"` into `(10.0, "nf")` using the longest prefix that parses as a number.
fn split_number(s: &str) -> Option<(f64, String)> {
    let mut ends: Vec<usize> = s.char_indices().map(|(i, _)| i).skip(1).collect();
    ends.push(s.len());
    ends.into_iter().rev().find_map(|end| {
        s[..end]
            .parse::<f64>()
            .ok()
            .map(|value| (value, s[end..].trim().to_lowercase()))
    })
}

impl<U: Unit> FromStr for Quantity<U> {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (value, suffix) = split_number(s).ok_or_else(|| format!("invalid quantity: {}", s))?;
        if !value.is_finite() {
            return Err(format!("quantity must be finite: {}", s));
        }
        let unit = U::from_suffix(&suffix)
            .ok_or_else(|| format!("unknown {:?} unit '{}' in {}", U::DIMENSION, suffix, s))?;
        Ok(Self::new(value, unit))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QuantityRepr {
    Number(f64),
    Text(String),
}

impl<'de, U: Unit> Deserialize<'de> for Quantity<U> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match QuantityRepr::deserialize(deserializer)? {
            QuantityRepr::Number(value) => Ok(Self::from_si(value)),
            QuantityRepr::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

impl<U: Unit> Serialize for Quantity<U> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value_si)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_frequency_scaling() {
        assert_relative_eq!(to_si(1.5, FrequencyUnit::KHz), 1500.0);
        assert_relative_eq!(to_si(2.0, FrequencyUnit::MHz), 2e6);
        assert_relative_eq!(from_si(2500.0, FrequencyUnit::KHz), 2.5);
        assert_relative_eq!(from_si(1000.0, FrequencyUnit::RadPerSecond), 2000.0 * PI);
        assert_relative_eq!(to_si(2.0 * PI, FrequencyUnit::RadPerSecond), 1.0);
    }

    #[test]
    fn test_capacitance_scaling() {
        assert_relative_eq!(to_si(10.0, CapacitanceUnit::Nanofarad), 10e-9);
        assert_relative_eq!(to_si(47.0, CapacitanceUnit::Picofarad), 47e-12);
        assert_relative_eq!(from_si(2.2e-6, CapacitanceUnit::Microfarad), 2.2);
    }

    #[test]
    fn test_parse_with_suffix() {
        let f: Frequency = "1kHz".parse().unwrap();
        assert_relative_eq!(f.si(), 1000.0);

        let f: Frequency = "1.5 MHz".parse().unwrap();
        assert_relative_eq!(f.si(), 1.5e6);

        let r: Resistance = "4.7k".parse().unwrap();
        assert_relative_eq!(r.si(), 4700.0);

        let r: Resistance = "10kΩ".parse().unwrap();
        assert_relative_eq!(r.si(), 10_000.0);

        let c: Capacitance = "4.7µF".parse().unwrap();
        assert_relative_eq!(c.si(), 4.7e-6);

        let c: Capacitance = "100pF".parse().unwrap();
        assert_relative_eq!(c.si(), 100e-12);
    }

    #[test]
    fn test_parse_bare_number_is_si() {
        let r: Resistance = "1000".parse().unwrap();
        assert_relative_eq!(r.si(), 1000.0);

        let c: Capacitance = "1e-8".parse().unwrap();
        assert_relative_eq!(c.si(), 1e-8);
    }

    #[test]
    fn test_parse_invalid() {
        assert!("abc".parse::<Frequency>().is_err());
        assert!("10xF".parse::<Capacitance>().is_err());
        assert!("inf".parse::<Resistance>().is_err());
        assert!("".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_display_unit_selection() {
        assert_eq!(format_si::<CapacitanceUnit>(470e-12), "470.00 pF");
        assert_eq!(format_si::<CapacitanceUnit>(10e-9), "10.00 nF");
        assert_eq!(format_si::<CapacitanceUnit>(2.2e-6), "2.20 µF");
        assert_eq!(format_si::<ResistanceUnit>(15_915.49), "15.92 kΩ");
        assert_eq!(format_dimension(1000.0, Dimension::Frequency), "1.00 kHz");
    }

    #[test]
    fn test_angular_frequency() {
        let f: Frequency = "6283.185 rad/s".parse().unwrap();
        assert_relative_eq!(f.si(), 1000.0, max_relative = 1e-6);
        assert_eq!(format_in(1000.0, FrequencyUnit::RadPerSecond), "6283.19 rad/s");
        assert_eq!(format_in(1000.0, FrequencyUnit::KHz), "1.00 kHz");
        // The automatic display choice stays in hertz
        assert_eq!(format_si::<FrequencyUnit>(1e7), "10.00 MHz");
    }
}
