use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::linter::findings::{Finding, FindingSlice, Severity};
use crate::preamble::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    Includes,
    Excludes,
}

/// Matches a header's trimmed value against a regular expression,
/// reporting with a configured message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub header: String,
    pub mode: Mode,
    pub pattern: String,
    pub message: String,
}

impl Pattern {
    pub fn validate(&self, id: &str) -> Result<(), ConfigError> {
        Regex::new(&self.pattern)
            .map(|_| ())
            .map_err(|error| ConfigError::InvalidPattern {
                id: id.to_string(),
                error,
            })
    }

    pub fn check(&self, id: &str, severity: Severity, doc: &Document) -> Vec<Finding> {
        let Some(header) = doc.by_name(&self.header) else {
            return Vec::new();
        };

        // Compilation failures are caught when the configuration loads.
        let Ok(re) = Regex::new(&self.pattern) else {
            return Vec::new();
        };

        let value = header.raw_value().trim();
        let note = match (self.mode, re.is_match(value)) {
            (Mode::Includes, false) => "required pattern was not matched",
            (Mode::Excludes, true) => "prohibited pattern was matched",
            _ => return Vec::new(),
        };

        let start = self.header.len() + 1;
        vec![
            Finding::new(id, severity, self.message.clone())
                .with_slice(FindingSlice::from_header(
                    header,
                    (start, start + header.raw_value().len()),
                    note,
                ))
                .with_footer(
                    Severity::Info,
                    format!("the pattern in question: `{}`", self.pattern),
                ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(mode: Mode, pattern: &str) -> Pattern {
        Pattern {
            header: "discussions-to".to_string(),
            mode,
            pattern: pattern.to_string(),
            message: "discussions-to must be a link".to_string(),
        }
    }

    fn check(rule: &Pattern, src: &str) -> Vec<Finding> {
        let doc = Document::parse(None, src).unwrap();
        rule.check("preamble-re-discussions-to", Severity::Error, &doc)
    }

    #[test]
    fn test_includes_passes_on_match() {
        let findings = check(
            &rule(Mode::Includes, "^https://"),
            "---\ndiscussions-to: https://example.com/t/1\n---\nbody\n",
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn test_includes_reports_the_configured_message() {
        let findings = check(
            &rule(Mode::Includes, "^https://"),
            "---\ndiscussions-to: gopher://example.com\n---\nbody\n",
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "discussions-to must be a link");
        assert_eq!(
            findings[0].slices[0].annotations[0].note,
            "required pattern was not matched"
        );
        assert_eq!(
            findings[0].footer[0].label,
            "the pattern in question: `^https://`"
        );
        assert_eq!(findings[0].footer[0].kind, Severity::Info);
    }

    #[test]
    fn test_excludes_reports_on_match() {
        let findings = check(
            &rule(Mode::Excludes, "(?i)banana"),
            "---\ndiscussions-to: Banana discussion\n---\nbody\n",
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].slices[0].annotations[0].note,
            "prohibited pattern was matched"
        );
    }

    #[test]
    fn test_excludes_passes_without_a_match() {
        let findings = check(
            &rule(Mode::Excludes, "(?i)banana"),
            "---\ndiscussions-to: apples only\n---\nbody\n",
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn test_validate_reports_bad_patterns() {
        let err = rule(Mode::Includes, "(unclosed")
            .validate("preamble-re-discussions-to")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { id, .. } if id == "preamble-re-discussions-to"));
    }
}
