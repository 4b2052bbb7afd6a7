use super::Formatter;
use crate::calculator::Calculation;
use crate::units::{FrequencyUnit, format_dimension, format_in, format_si};

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, calculation: &Calculation) -> String {
        let solved = &calculation.components;
        let mut lines = vec![format!("Topology: {}", calculation.topology)];

        let frequencies: Vec<String> = solved
            .frequency_values()
            .into_iter()
            .map(|(name, value, dimension)| {
                format!("{}: {}", name, format_dimension(value, dimension))
            })
            .collect();
        lines.push(format!(
            "{}  ({})",
            frequencies.join("  "),
            format_in(solved.frequency, FrequencyUnit::RadPerSecond)
        ));
        lines.push(format!(
            "Gain: {:.2} dB (A = {:.4})  Q: {:.4}  n: {:.4}",
            solved.gain_db(),
            solved.gain,
            solved.q,
            solved.n
        ));
        lines.push(String::new());
        lines.extend(
            solved
                .component_values()
                .into_iter()
                .map(|(name, value, dimension)| {
                    format!("{:>4}: {}", name, format_dimension(value, dimension))
                }),
        );
        lines.push(String::new());
        lines.push(calculation.symbolic.clone());

        if self.verbose {
            lines.push(String::new());
            lines.push(format!("{:>14} {:>12}", "Frequency", "Magnitude"));
            lines.extend(calculation.bode.iter().map(|point| {
                format!(
                    "{:>14} {:>9.2} dB",
                    format_si::<FrequencyUnit>(point.frequency_hz),
                    point.magnitude_db
                )
            }));
        }
        lines.join("\n")
    }
}
