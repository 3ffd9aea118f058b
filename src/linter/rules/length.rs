use serde::{Deserialize, Serialize};

use crate::linter::findings::{Finding, FindingSlice, Severity};
use crate::preamble::Document;

/// Bounds on the byte length of a header's trimmed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Length {
    pub header: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<usize>,
}

impl Length {
    pub fn check(&self, id: &str, severity: Severity, doc: &Document) -> Vec<Finding> {
        let Some(header) = doc.by_name(&self.header) else {
            return Vec::new();
        };

        let length = header.raw_value().trim().len();
        let start = self.header.len() + 1;
        let highlight = (start, start + header.raw_value().len());
        let mut findings = Vec::new();

        if let Some(max) = self.max
            && length > max
        {
            findings.push(
                Finding::new(
                    id,
                    severity,
                    format!(
                        "preamble header `{}` value is too long (max {})",
                        self.header, max
                    ),
                )
                .with_slice(FindingSlice::from_header(header, highlight, "too long")),
            );
        }

        if let Some(min) = self.min
            && length < min
        {
            findings.push(
                Finding::new(
                    id,
                    severity,
                    format!(
                        "preamble header `{}` value is too short (min {})",
                        self.header, min
                    ),
                )
                .with_slice(FindingSlice::from_header(header, highlight, "too short")),
            );
        }

        findings
    }
}
