use serde::{Deserialize, Serialize};

use crate::linter::findings::{Finding, FindingSlice, Severity};
use crate::preamble::Document;

/// Couples one header to another: `then` must be present exactly when
/// `when` equals `equals`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredIfEq {
    pub when: String,
    pub equals: String,
    pub then: String,
}

impl RequiredIfEq {
    pub fn check(&self, id: &str, severity: Severity, doc: &Document) -> Vec<Finding> {
        let when_opt = doc.by_name(&self.when);
        let then_opt = doc.by_name(&self.then);

        match (when_opt, then_opt) {
            (None, None) => Vec::new(),
            (Some(when), Some(_)) if when.raw_value().trim() == self.equals => Vec::new(),
            (Some(when), None) if when.raw_value().trim() != self.equals => Vec::new(),

            (Some(when), None) => vec![
                Finding::new(
                    id,
                    severity,
                    format!(
                        "preamble header `{}` is required when `{}` is `{}`",
                        self.then, self.when, self.equals,
                    ),
                )
                .with_slice(FindingSlice::pinned(
                    when,
                    (0, when.source_line().len()),
                    "defined here",
                    Severity::Info,
                )),
            ],

            (Some(when), Some(then)) => {
                let mut slices = vec![
                    FindingSlice::pinned(
                        when,
                        (0, when.source_line().len()),
                        format!("unless equal to `{}`", self.equals),
                        Severity::Info,
                    ),
                    FindingSlice::from_header(
                        then,
                        (0, then.source_line().len()),
                        "remove this",
                    ),
                ];
                slices.sort_by_key(|slice| slice.span.line_start);

                vec![
                    Finding::new(
                        id,
                        severity,
                        format!(
                            "preamble header `{}` is only allowed when `{}` is `{}`",
                            self.then, self.when, self.equals,
                        ),
                    )
                    .with_slices(slices),
                ]
            }

            (None, Some(then)) => vec![
                Finding::new(
                    id,
                    severity,
                    format!(
                        "preamble header `{}` is only allowed when `{}` is `{}`",
                        self.then, self.when, self.equals,
                    ),
                )
                .with_slice(FindingSlice::from_header(
                    then,
                    (0, then.source_line().len()),
                    "defined here",
                )),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> RequiredIfEq {
        RequiredIfEq {
            when: "status".to_string(),
            equals: "Withdrawn".to_string(),
            then: "withdrawal-reason".to_string(),
        }
    }

    fn check(src: &str) -> Vec<Finding> {
        let doc = Document::parse(None, src).unwrap();
        rule().check("preamble-req-withdrawal-reason", Severity::Error, &doc)
    }

    #[test]
    fn test_both_absent_passes() {
        assert!(check("---\ntitle: x\n---\nbody\n").is_empty());
    }

    #[test]
    fn test_matching_pair_passes() {
        let src = "---\nstatus: Withdrawn\nwithdrawal-reason: too spicy\n---\nbody\n";
        assert!(check(src).is_empty());
    }

    #[test]
    fn test_missing_dependent_header() {
        let findings = check("---\nstatus: Withdrawn\n---\nbody\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].message,
            "preamble header `withdrawal-reason` is required when `status` is `Withdrawn`"
        );
        let annotation = &findings[0].slices[0].annotations[0];
        assert_eq!(annotation.note, "defined here");
        assert_eq!(annotation.severity, Some(Severity::Info));
    }

    #[test]
    fn test_dependent_present_under_the_wrong_value() {
        let src = "---\nwithdrawal-reason: too spicy\nstatus: Final\n---\nbody\n";
        let findings = check(src);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].message,
            "preamble header `withdrawal-reason` is only allowed when `status` is `Withdrawn`"
        );
        // Slices come out in line order even though `when` is listed first.
        assert_eq!(findings[0].slices[0].span.line_start, 2);
        assert_eq!(findings[0].slices[0].annotations[0].note, "remove this");
        assert_eq!(findings[0].slices[1].span.line_start, 3);
        assert_eq!(
            findings[0].slices[1].annotations[0].note,
            "unless equal to `Withdrawn`"
        );
    }

    #[test]
    fn test_dependent_present_without_the_governing_header() {
        let findings = check("---\nwithdrawal-reason: too spicy\n---\nbody\n");
        assert_eq!(findings.len(), 1);
        let annotation = &findings[0].slices[0].annotations[0];
        assert_eq!(annotation.note, "defined here");
        assert_eq!(annotation.severity, None);
    }
}
