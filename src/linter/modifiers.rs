use serde::{Deserialize, Serialize};

use crate::linter::findings::{Finding, Severity};

/// A display-stage adjustment applied after severity resolution.
///
/// Modifiers never drop findings and never touch one whose severity was
/// already fixed by `warn`/`allow`/`deny`. Targeting a rule id with no
/// findings (or no registration at all) is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Modifier {
    /// Rewrites the severity of every finding a rule produced and,
    /// when `value` is given, the note on its severity-tracking
    /// annotations.
    SetDefaultAnnotation {
        lint: String,
        annotation_type: Severity,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
}

/// Runs each modifier over the finding in declaration order.
pub fn apply(mut finding: Finding, modifiers: &[Modifier]) -> Finding {
    for modifier in modifiers {
        match modifier {
            Modifier::SetDefaultAnnotation {
                lint,
                annotation_type,
                value,
            } => {
                if *lint != finding.rule_id || finding.severity_overridden {
                    continue;
                }

                finding.severity = *annotation_type;

                if let Some(note) = value {
                    for slice in &mut finding.slices {
                        for annotation in &mut slice.annotations {
                            // Pinned annotations keep their own severity
                            // and their own wording.
                            if annotation.severity.is_none() {
                                annotation.note = note.clone();
                            }
                        }
                    }
                }
            }
        }
    }

    finding
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::findings::{FindingAnnotation, FindingSlice};
    use crate::preamble::Document;

    fn sample_finding() -> Finding {
        let doc = Document::parse(None, "---\nstatus: Draft\n---\nbody\n").unwrap();
        let header = doc.by_name("status").unwrap();

        Finding::new("preamble-requires-status", Severity::Error, "message")
            .with_slice(FindingSlice::with_annotations(
                header,
                vec![
                    FindingAnnotation::tracking((8, 13), "has a less advanced status"),
                    FindingAnnotation::pinned((0, 6), "defined here", Severity::Info),
                ],
            ))
    }

    #[test]
    fn test_rewrites_severity_for_the_named_rule() {
        let modifiers = vec![Modifier::SetDefaultAnnotation {
            lint: "preamble-requires-status".to_string(),
            annotation_type: Severity::Info,
            value: None,
        }];

        let modified = apply(sample_finding(), &modifiers);
        assert_eq!(modified.severity, Severity::Info);
        // Without a value the annotation notes survive.
        assert_eq!(
            modified.slices[0].annotations[0].note,
            "has a less advanced status"
        );
    }

    #[test]
    fn test_value_replaces_tracking_notes_only() {
        let modifiers = vec![Modifier::SetDefaultAnnotation {
            lint: "preamble-requires-status".to_string(),
            annotation_type: Severity::Warning,
            value: Some("depends on an unstable proposal".to_string()),
        }];

        let modified = apply(sample_finding(), &modifiers);
        assert_eq!(
            modified.slices[0].annotations[0].note,
            "depends on an unstable proposal"
        );
        assert_eq!(modified.slices[0].annotations[1].note, "defined here");
    }

    #[test]
    fn test_skips_other_rules_and_overridden_findings() {
        let modifiers = vec![Modifier::SetDefaultAnnotation {
            lint: "preamble-trim".to_string(),
            annotation_type: Severity::Info,
            value: None,
        }];
        let untouched = apply(sample_finding(), &modifiers);
        assert_eq!(untouched.severity, Severity::Error);

        let modifiers = vec![Modifier::SetDefaultAnnotation {
            lint: "preamble-requires-status".to_string(),
            annotation_type: Severity::Info,
            value: None,
        }];
        let mut resolved = sample_finding();
        resolved.severity = Severity::Warning;
        resolved.severity_overridden = true;
        let kept = apply(resolved, &modifiers);
        assert_eq!(kept.severity, Severity::Warning);
    }

    #[test]
    fn test_deserializes_from_kebab_case_kind() {
        let raw = r#"{"kind":"set-default-annotation","lint":"preamble-requires-status","annotation_type":"info"}"#;
        let modifier: Modifier = serde_json::from_str(raw).unwrap();
        assert_eq!(
            modifier,
            Modifier::SetDefaultAnnotation {
                lint: "preamble-requires-status".to_string(),
                annotation_type: Severity::Info,
                value: None,
            }
        );
    }
}
