use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::linter::findings::{Finding, Severity};
use crate::linter::resources::Resources;
use crate::preamble::Document;

pub mod date;
pub mod file_name;
pub mod length;
pub mod list;
pub mod no_duplicates;
pub mod one_of;
pub mod order;
pub mod pattern;
pub mod required;
pub mod required_if_eq;
pub mod requires_status;
pub mod trim;
pub mod uint;

/// Configuration for one rule, dispatched on its serialized `kind` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RuleKind {
    PreambleDate(date::Date),
    PreambleFileName(file_name::FileName),
    PreambleLength(length::Length),
    PreambleList(list::List),
    PreambleNoDuplicates,
    PreambleOneOf(one_of::OneOf),
    PreambleOrder(order::Order),
    PreambleRegex(pattern::Pattern),
    PreambleRequired(required::Required),
    PreambleRequiredIfEq(required_if_eq::RequiredIfEq),
    PreambleRequiresStatus(requires_status::RequiresStatus),
    PreambleTrim,
    PreambleUint(uint::Uint),
    PreambleUintList(uint::UintList),
}

impl RuleKind {
    /// The serialized `kind` tag for this rule.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PreambleDate(_) => "preamble-date",
            Self::PreambleFileName(_) => "preamble-file-name",
            Self::PreambleLength(_) => "preamble-length",
            Self::PreambleList(_) => "preamble-list",
            Self::PreambleNoDuplicates => "preamble-no-duplicates",
            Self::PreambleOneOf(_) => "preamble-one-of",
            Self::PreambleOrder(_) => "preamble-order",
            Self::PreambleRegex(_) => "preamble-regex",
            Self::PreambleRequired(_) => "preamble-required",
            Self::PreambleRequiredIfEq(_) => "preamble-required-if-eq",
            Self::PreambleRequiresStatus(_) => "preamble-requires-status",
            Self::PreambleTrim => "preamble-trim",
            Self::PreambleUint(_) => "preamble-uint",
            Self::PreambleUintList(_) => "preamble-uint-list",
        }
    }

    pub(crate) fn check(
        &self,
        id: &str,
        severity: Severity,
        doc: &Document,
        resources: &Resources,
    ) -> Vec<Finding> {
        match self {
            Self::PreambleDate(rule) => rule.check(id, severity, doc),
            Self::PreambleFileName(rule) => rule.check(id, severity, doc),
            Self::PreambleLength(rule) => rule.check(id, severity, doc),
            Self::PreambleList(rule) => rule.check(id, severity, doc),
            Self::PreambleNoDuplicates => no_duplicates::check(id, severity, doc),
            Self::PreambleOneOf(rule) => rule.check(id, severity, doc),
            Self::PreambleOrder(rule) => rule.check(id, severity, doc),
            Self::PreambleRegex(rule) => rule.check(id, severity, doc),
            Self::PreambleRequired(rule) => rule.check(id, severity, doc),
            Self::PreambleRequiredIfEq(rule) => rule.check(id, severity, doc),
            Self::PreambleRequiresStatus(rule) => rule.check(id, severity, doc, resources),
            Self::PreambleTrim => trim::check(id, severity, doc),
            Self::PreambleUint(rule) => rule.check(id, severity, doc),
            Self::PreambleUintList(rule) => rule.check(id, severity, doc),
        }
    }

    /// Sibling proposal numbers this rule would read while checking `doc`.
    pub(crate) fn references(&self, doc: &Document) -> Vec<u64> {
        match self {
            Self::PreambleRequiresStatus(rule) => rule.references(doc),
            _ => Vec::new(),
        }
    }

    pub(crate) fn validate(&self, id: &str) -> Result<(), ConfigError> {
        match self {
            Self::PreambleRegex(rule) => rule.validate(id),
            _ => Ok(()),
        }
    }
}

/// One registered rule: its intrinsic severity plus kind-specific settings.
///
/// The severity here is what the rule reports with before any
/// `warn`/`allow`/`deny` override is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDefinition {
    #[serde(default = "default_severity")]
    pub severity: Severity,
    #[serde(flatten)]
    pub kind: RuleKind,
}

fn default_severity() -> Severity {
    Severity::Error
}

impl RuleDefinition {
    pub fn new(kind: RuleKind) -> Self {
        Self {
            severity: Severity::Error,
            kind,
        }
    }
}

/// The rule set for one run, keyed by rule id.
///
/// A `BTreeMap` keeps evaluation in id order, so output is stable no
/// matter how configuration interleaved its additions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    rules: BTreeMap<String, RuleDefinition>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule, replacing any previous definition under the same id.
    pub fn register(&mut self, id: impl Into<String>, definition: RuleDefinition) {
        self.rules.insert(id.into(), definition);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rules.contains_key(id)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Registered rules in evaluation (id) order.
    pub fn rules(&self) -> impl Iterator<Item = (&str, &RuleDefinition)> {
        self.rules
            .iter()
            .map(|(id, definition)| (id.as_str(), definition))
    }

    /// Checks settings that can only fail at run time, like pattern
    /// compilation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (id, definition) in &self.rules {
            definition.kind.validate(id)?;
        }
        Ok(())
    }

    /// Sibling proposal numbers the rules want loaded before `doc` is
    /// checked.
    pub fn references(&self, doc: &Document) -> BTreeSet<u64> {
        self.rules
            .values()
            .flat_map(|definition| definition.kind.references(doc))
            .collect()
    }

    /// Runs every rule over the document, in id order.
    pub fn evaluate(&self, doc: &Document, resources: &Resources) -> Vec<Finding> {
        let mut findings = Vec::new();

        for (id, definition) in &self.rules {
            log::debug!("Running lint rule: {}", id);
            let produced = definition
                .kind
                .check(id, definition.severity, doc, resources);
            log::debug!("Rule {} found {} finding(s)", id, produced.len());
            findings.extend(produced);
        }

        findings
    }
}
