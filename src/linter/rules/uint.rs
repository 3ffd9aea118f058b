use serde::{Deserialize, Serialize};

use crate::linter::findings::{Finding, FindingAnnotation, FindingSlice, Severity};
use crate::preamble::Document;

/// A header whose value must parse as a `u64`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uint {
    pub header: String,
}

impl Uint {
    pub fn check(&self, id: &str, severity: Severity, doc: &Document) -> Vec<Finding> {
        let Some(header) = doc.by_name(&self.header) else {
            return Vec::new();
        };

        if header.raw_value().trim().parse::<u64>().is_ok() {
            return Vec::new();
        }

        let start = self.header.len() + 1;
        vec![
            Finding::new(
                id,
                severity,
                format!(
                    "preamble header `{}` must be an unsigned integer",
                    self.header
                ),
            )
            .with_slice(FindingSlice::from_header(
                header,
                (start, start + header.raw_value().len()),
                "not a non-negative integer",
            )),
        ]
    }
}

/// A comma-separated header whose items must be `u64`s in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UintList {
    pub header: String,
}

impl UintList {
    pub fn check(&self, id: &str, severity: Severity, doc: &Document) -> Vec<Finding> {
        let Some(header) = doc.by_name(&self.header) else {
            return Vec::new();
        };

        let mut findings = Vec::new();
        let mut values: Vec<u64> = Vec::new();
        let mut not_uint = Vec::new();

        let name_len = self.header.len();
        let mut offset = 0;
        for item in header.raw_value().split(',') {
            let current = offset;
            offset += item.len() + 1;

            match item.trim().parse() {
                Ok(value) => values.push(value),
                Err(_) => not_uint.push(FindingAnnotation::tracking(
                    (name_len + current + 1, name_len + current + 1 + item.len()),
                    "not a non-negative integer",
                )),
            }
        }

        if !not_uint.is_empty() {
            findings.push(
                Finding::new(
                    id,
                    severity,
                    format!(
                        "preamble header `{}` items must be unsigned integers",
                        self.header
                    ),
                )
                .with_slice(FindingSlice::with_annotations(header, not_uint)),
            );
        }

        let mut sorted = values.clone();
        sorted.sort_unstable();

        if sorted != values {
            findings.push(
                Finding::new(
                    id,
                    severity,
                    format!(
                        "preamble header `{}` items must be sorted in ascending order",
                        self.header
                    ),
                )
                .with_slice(FindingSlice::unannotated(header)),
            );
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_uint(src: &str) -> Vec<Finding> {
        let rule = Uint {
            header: "number".to_string(),
        };
        let doc = Document::parse(None, src).unwrap();
        rule.check("preamble-uint-number", Severity::Error, &doc)
    }

    fn check_list(src: &str) -> Vec<Finding> {
        let rule = UintList {
            header: "requires".to_string(),
        };
        let doc = Document::parse(None, src).unwrap();
        rule.check("preamble-uint-list-requires", Severity::Error, &doc)
    }

    #[test]
    fn test_uint_accepts_plain_numbers() {
        assert!(check_uint("---\nnumber: 42\n---\nbody\n").is_empty());
    }

    #[test]
    fn test_uint_rejects_signs_and_words() {
        for src in ["---\nnumber: -1\n---\nbody\n", "---\nnumber: banana\n---\nbody\n"] {
            let findings = check_uint(src);
            assert_eq!(findings.len(), 1);
            assert_eq!(
                findings[0].message,
                "preamble header `number` must be an unsigned integer"
            );
            assert_eq!(
                findings[0].slices[0].annotations[0].note,
                "not a non-negative integer"
            );
        }
    }

    #[test]
    fn test_list_accepts_sorted_numbers() {
        assert!(check_list("---\nrequires: 1, 2, 10\n---\nbody\n").is_empty());
    }

    #[test]
    fn test_list_pools_bad_items_into_one_slice() {
        let findings = check_list("---\nrequires: 1, x, 3, y\n---\nbody\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].message,
            "preamble header `requires` items must be unsigned integers"
        );
        let annotations = &findings[0].slices[0].annotations;
        assert_eq!(annotations.len(), 2);
        // Item offsets count from the colon over the raw value.
        assert_eq!(annotations[0].highlight, (12, 14));
        assert_eq!(annotations[1].highlight, (18, 20));
    }

    #[test]
    fn test_list_out_of_order() {
        let findings = check_list("---\nrequires: 3, 1\n---\nbody\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].message,
            "preamble header `requires` items must be sorted in ascending order"
        );
        assert!(findings[0].slices[0].annotations.is_empty());
    }

    #[test]
    fn test_list_reports_parse_and_order_problems_together() {
        let findings = check_list("---\nrequires: 3, x, 1\n---\nbody\n");
        assert_eq!(findings.len(), 2);
    }
}
