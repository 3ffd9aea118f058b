use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::linter::findings::{Finding, FindingSlice, Severity};
use crate::preamble::{Document, PreambleHeader};

/// Flags headers defined more than once, pairing each repeat with the
/// first definition.
pub fn check(id: &str, severity: Severity, doc: &Document) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut seen: HashMap<&str, &PreambleHeader> = HashMap::new();

    for header in doc.headers() {
        match seen.entry(header.name()) {
            Entry::Vacant(slot) => {
                slot.insert(header);
            }
            Entry::Occupied(first) => {
                let first = *first.get();
                findings.push(
                    Finding::new(
                        id,
                        severity,
                        format!("preamble header `{}` defined multiple times", header.name()),
                    )
                    .with_slice(FindingSlice::pinned(
                        first,
                        (0, first.source_line().len()),
                        "first defined here",
                        Severity::Info,
                    ))
                    .with_slice(FindingSlice::from_header(
                        header,
                        (0, header.source_line().len()),
                        "redefined here",
                    )),
                );
            }
        }
    }

    findings
}
