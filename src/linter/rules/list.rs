use serde::{Deserialize, Serialize};

use crate::linter::findings::{Finding, FindingAnnotation, FindingSlice, Severity};
use crate::preamble::Document;

/// A comma-separated header: no empty items, one space after each comma,
/// no other whitespace around items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub header: String,
}

impl List {
    pub fn check(&self, id: &str, severity: Severity, doc: &Document) -> Vec<Finding> {
        let Some(header) = doc.by_name(&self.header) else {
            return Vec::new();
        };

        let mut findings = Vec::new();
        let mut missing_space = Vec::new();
        let mut extra_space = Vec::new();

        let name_len = self.header.len();
        let value = header.raw_value().trim();

        let mut offset = 0;
        for item in value.split(',') {
            let current = offset;
            offset += item.len() + 1;

            if item.trim().is_empty() {
                findings.push(
                    Finding::new(
                        id,
                        severity,
                        format!("preamble header `{}` cannot have empty items", self.header),
                    )
                    .with_slice(FindingSlice::from_header(
                        header,
                        (name_len + current + 1, name_len + current + 2),
                        "this item is empty",
                    )),
                );
                continue;
            }

            let rest = match item.strip_prefix(' ') {
                Some(rest) => rest,
                None if current == 0 => item,
                None => {
                    missing_space.push(FindingAnnotation::tracking(
                        (name_len + current + 1, name_len + current + 2),
                        "missing space",
                    ));
                    continue;
                }
            };

            if rest.trim() != rest {
                extra_space.push(FindingAnnotation::tracking(
                    (
                        name_len + current + 2,
                        name_len + current + 2 + item.len(),
                    ),
                    "extra space",
                ));
            }
        }

        if !missing_space.is_empty() {
            findings.push(
                Finding::new(
                    id,
                    severity,
                    "preamble header list items must begin with a space",
                )
                .with_slice(FindingSlice::with_annotations(header, missing_space)),
            );
        }

        if !extra_space.is_empty() {
            findings.push(
                Finding::new(
                    id,
                    severity,
                    "preamble header list items have extra whitespace",
                )
                .with_slice(FindingSlice::with_annotations(header, extra_space)),
            );
        }

        findings
    }
}
