use std::ffi::OsStr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::linter::findings::{Finding, FindingSlice, Severity};
use crate::preamble::Document;

/// The file's name must be `{prefix}{value}{suffix}` built from a header.
///
/// Documents without an origin (stdin, in-memory checks) are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileName {
    pub header: String,
    pub prefix: String,
    pub suffix: String,
}

impl FileName {
    pub fn check(&self, id: &str, severity: Severity, doc: &Document) -> Vec<Finding> {
        let Some(header) = doc.by_name(&self.header) else {
            return Vec::new();
        };

        let Some(file_name) = doc.origin().and_then(|o| Path::new(o).file_name()) else {
            return Vec::new();
        };

        let expected = format!(
            "{}{}{}",
            self.prefix,
            header.raw_value().trim(),
            self.suffix
        );

        if file_name == OsStr::new(&expected) {
            return Vec::new();
        }

        let start = self.header.len() + 1;
        vec![
            Finding::new(
                id,
                severity,
                format!(
                    "file name must reflect the preamble header `{}`",
                    self.header
                ),
            )
            .with_slice(FindingSlice::from_header(
                header,
                (start, start + header.raw_value().len()),
                "this value",
            ))
            .with_footer(
                Severity::Help,
                format!("this file's name should be `{}`", expected),
            ),
        ]
    }
}
