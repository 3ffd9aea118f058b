use std::collections::BTreeSet;

use crate::config::ConfigError;
use crate::linter::findings::{Finding, Severity};

/// Severity overrides collected from the `warn`, `allow`, and `deny`
/// configuration lists.
///
/// A rule id may appear in at most one list; `allow` wins by dropping the
/// finding before the other two are consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    warn: BTreeSet<String>,
    allow: BTreeSet<String>,
    deny: BTreeSet<String>,
}

impl Overrides {
    pub fn new(
        warn: impl IntoIterator<Item = String>,
        allow: impl IntoIterator<Item = String>,
        deny: impl IntoIterator<Item = String>,
    ) -> Result<Self, ConfigError> {
        let mut resolved = Self::default();

        for id in warn {
            resolved.warn.insert(id);
        }
        for id in allow {
            if resolved.warn.contains(&id) {
                return Err(ConfigError::DuplicateSeverity { id });
            }
            resolved.allow.insert(id);
        }
        for id in deny {
            if resolved.warn.contains(&id) || resolved.allow.contains(&id) {
                return Err(ConfigError::DuplicateSeverity { id });
            }
            resolved.deny.insert(id);
        }

        Ok(resolved)
    }

    /// Every rule id named by any of the three lists.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.warn
            .iter()
            .chain(&self.allow)
            .chain(&self.deny)
            .map(String::as_str)
    }

    /// Applies the configured override to one finding.
    ///
    /// Allowed rules are dropped. Denied rules become errors and warned
    /// rules become warnings, both marked overridden so later modifiers
    /// leave them alone. Everything else passes through unchanged.
    pub fn resolve(&self, mut finding: Finding) -> Option<Finding> {
        if self.allow.contains(&finding.rule_id) {
            return None;
        }

        if self.deny.contains(&finding.rule_id) {
            finding.severity = Severity::Error;
            finding.severity_overridden = true;
        } else if self.warn.contains(&finding.rule_id) {
            finding.severity = Severity::Warning;
            finding.severity_overridden = true;
        }

        Some(finding)
    }
}
