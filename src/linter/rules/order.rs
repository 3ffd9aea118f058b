use serde::{Deserialize, Serialize};

use crate::linter::findings::{Finding, FindingSlice, Severity};
use crate::preamble::Document;

/// The canonical header sequence; anything outside it is unrecognized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub headers: Vec<String>,
}

impl Order {
    pub fn check(&self, id: &str, severity: Severity, doc: &Document) -> Vec<Finding> {
        let mut findings = Vec::new();

        let extras: Vec<_> = doc
            .headers()
            .filter(|header| !self.headers.iter().any(|known| known == header.name()))
            .collect();

        if !extras.is_empty() {
            let mut finding = Finding::new(id, severity, "preamble has extra header(s)");
            for header in extras {
                finding = finding.with_slice(FindingSlice::from_header(
                    header,
                    (0, header.name().len()),
                    "unrecognized header",
                ));
            }
            findings.push(finding);
        }

        // A header is out of order when it sits on an earlier line than the
        // previous present entry of the canonical sequence.
        let mut previous: Option<(&str, usize)> = None;
        for name in &self.headers {
            let Some(header) = doc.by_name(name) else {
                continue;
            };

            if let Some((previous_name, previous_line)) = previous
                && header.line_start() < previous_line
            {
                findings.push(
                    Finding::new(
                        id,
                        severity,
                        format!("preamble header `{}` is out of order", name),
                    )
                    .with_slice(FindingSlice::unannotated(header))
                    .with_footer(
                        Severity::Help,
                        format!("`{}` should come after `{}`", name, previous_name),
                    ),
                );
            }

            previous = Some((name, header.line_start()));
        }

        findings
    }
}
