use crate::linter::findings::{Finding, FindingSlice, Severity};
use crate::preamble::Document;

/// Header values start with exactly one space and carry no other
/// surrounding whitespace. Empty values are left to other rules.
pub fn check(id: &str, severity: Severity, doc: &Document) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut missing_space = Vec::new();

    for header in doc.headers() {
        let value = header.raw_value();
        if value.is_empty() {
            continue;
        }

        let rest = match value.strip_prefix(' ') {
            Some(rest) => rest,
            None => {
                missing_space.push(header);
                value
            }
        };

        if rest.trim() != rest {
            let name = header.name();
            findings.push(
                Finding::new(
                    id,
                    severity,
                    format!("preamble header `{}` has extra whitespace", name),
                )
                .with_slice(FindingSlice::from_header(
                    header,
                    (name.len() + 1, name.len() + 1 + value.len()),
                    "value has extra whitespace",
                )),
            );
        }
    }

    if !missing_space.is_empty() {
        let mut finding = Finding::new(
            id,
            severity,
            "preamble header values must begin with a space",
        );
        for header in missing_space {
            let start = header.name().len() + 1;
            finding = finding.with_slice(FindingSlice::from_header(
                header,
                (start, start + 1),
                "space required here",
            ));
        }
        findings.push(finding);
    }

    findings
}
