use super::Formatter;
use crate::calculator::Calculation;

/// Bode sequence as `frequency_hz,magnitude_db` rows
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, calculation: &Calculation) -> String {
        calculation
            .bode
            .iter()
            .map(|point| format!("{:.6},{:.4}", point.frequency_hz, point.magnitude_db))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn header(&self) -> Option<&'static str> {
        Some("frequency_hz,magnitude_db")
    }
}
