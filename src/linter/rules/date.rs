use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::linter::findings::{Finding, FindingSlice, Severity};
use crate::preamble::Document;

/// A header holding an ISO 8601 calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Date {
    pub header: String,
}

impl Date {
    pub fn check(&self, id: &str, severity: Severity, doc: &Document) -> Vec<Finding> {
        let Some(header) = doc.by_name(&self.header) else {
            return Vec::new();
        };

        let value = header.raw_value().trim();
        let mut error = None;

        // chrono accepts unpadded fields, so the shape is checked first.
        let lengths: Vec<_> = value.split('-').map(str::len).collect();
        if lengths != [4, 2, 2] {
            error = Some("invalid length".to_string());
        }

        if let Err(e) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            error = Some(e.to_string());
        }

        let Some(note) = error else {
            return Vec::new();
        };

        let start = self.header.len() + 1;
        vec![
            Finding::new(
                id,
                severity,
                format!(
                    "preamble header `{}` is not a date in the `YYYY-MM-DD` format",
                    self.header
                ),
            )
            .with_slice(FindingSlice::from_header(
                header,
                (start, start + header.raw_value().len()),
                note,
            )),
        ]
    }
}
