use serde::{Deserialize, Serialize};

use crate::linter::findings::{Finding, FindingSlice, Severity};
use crate::preamble::Document;

/// Restricts a header to a closed set of values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneOf {
    pub header: String,
    pub values: Vec<String>,
}

impl OneOf {
    pub fn check(&self, id: &str, severity: Severity, doc: &Document) -> Vec<Finding> {
        let Some(header) = doc.by_name(&self.header) else {
            return Vec::new();
        };

        let value = header.raw_value().trim();
        if self.values.iter().any(|candidate| candidate == value) {
            return Vec::new();
        }

        let start = self.header.len() + 1;
        vec![
            Finding::new(
                id,
                severity,
                format!(
                    "preamble header `{}` has an unrecognized value",
                    self.header
                ),
            )
            .with_slice(FindingSlice::from_header(
                header,
                (start, start + header.raw_value().len()),
                format!("must be one of: `{}`", self.values.join("`, `")),
            )),
        ]
    }
}
