use serde::{Deserialize, Serialize};

use crate::linter::findings::{Finding, FindingSlice, Severity};
use crate::preamble::{Document, SourceSpan};

/// Headers every document must define.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Required {
    pub headers: Vec<String>,
}

impl Required {
    pub fn check(&self, id: &str, severity: Severity, doc: &Document) -> Vec<Finding> {
        let missing: Vec<&str> = self
            .headers
            .iter()
            .map(String::as_str)
            .filter(|name| doc.by_name(name).is_none())
            .collect();

        if missing.is_empty() {
            return Vec::new();
        }

        // Parsing guarantees line 1 is the opening delimiter. The slice is
        // folded with no annotations, so only the title is printed.
        let slice = FindingSlice {
            span: SourceSpan {
                origin: doc.origin().map(str::to_owned),
                line_start: 1,
                column_range: (0, 3),
            },
            source: "---".to_string(),
            fold: true,
            annotations: Vec::new(),
        };

        vec![
            Finding::new(
                id,
                severity,
                format!("preamble is missing header(s): `{}`", missing.join("`, `")),
            )
            .with_slice(slice),
        ]
    }
}
