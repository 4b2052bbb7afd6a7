use serde::Serialize;

use super::{Formatter, iso8601_timestamp};
use crate::calculator::Calculation;

pub struct JsonFormatter;

#[derive(Serialize)]
struct Report<'a> {
    calculated_at: String,
    #[serde(flatten)]
    calculation: &'a Calculation,
}

impl Formatter for JsonFormatter {
    fn format(&self, calculation: &Calculation) -> String {
        let report = Report {
            calculated_at: iso8601_timestamp(),
            calculation,
        };
        serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
            log::error!("Failed to serialize calculation: {}", e);
            format!(r#"{{"calculated_at":"{}","error":"serialization failed"}}"#, report.calculated_at)
        })
    }
}
