use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::linter::findings::{Finding, FindingAnnotation, FindingSlice, Severity};
use crate::linter::resources::{Resource, Resources};
use crate::preamble::Document;

/// Every proposal named by `requires` must sit at least as far along the
/// status lifecycle as this document.
///
/// `flow` groups statuses into tiers; everything in one group is
/// interchangeable for comparison. A status outside the flow (or a
/// missing `status` header) compares as tier zero and never complains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiresStatus {
    pub requires: String,
    pub status: String,
    pub flow: Vec<Vec<String>>,
}

impl RequiresStatus {
    fn tier_map(&self) -> HashMap<&str, usize> {
        let mut map = HashMap::new();
        for (tier, group) in self.flow.iter().enumerate() {
            for value in group {
                map.insert(value.as_str(), tier + 1);
            }
        }
        map
    }

    fn tier(&self, map: &HashMap<&str, usize>, doc: &Document) -> usize {
        doc.by_name(&self.status)
            .map(|header| header.raw_value().trim())
            .and_then(|status| map.get(status))
            .copied()
            .unwrap_or(0)
    }

    /// Proposal numbers named by the `requires` header.
    pub fn references(&self, doc: &Document) -> Vec<u64> {
        let Some(header) = doc.by_name(&self.requires) else {
            return Vec::new();
        };

        header
            .raw_value()
            .split(',')
            .map(str::trim)
            .filter_map(|item| item.parse().ok())
            .collect()
    }

    pub fn check(
        &self,
        id: &str,
        severity: Severity,
        doc: &Document,
        resources: &Resources,
    ) -> Vec<Finding> {
        let Some(header) = doc.by_name(&self.requires) else {
            return Vec::new();
        };

        let map = self.tier_map();
        let my_tier = self.tier(&map, doc);

        let mut findings = Vec::new();
        let mut too_unstable = Vec::new();
        let mut min = usize::MAX;

        let name_len = self.requires.len();
        let mut offset = 0;
        for item in header.raw_value().split(',') {
            let current = offset;
            offset += item.len() + 1;

            let Ok(number) = item.trim().parse::<u64>() else {
                continue;
            };

            let highlight = (name_len + current + 1, name_len + current + 1 + item.len());

            let their_doc = match resources.get(number) {
                Some(Resource::Loaded(their_doc)) => their_doc,
                Some(Resource::Unavailable { path, reason }) => {
                    findings.push(
                        Finding::new(
                            id,
                            severity,
                            format!("unable to read file `{}`: {}", path, reason),
                        )
                        .with_slice(FindingSlice::from_header(
                            header,
                            highlight,
                            "required from here",
                        )),
                    );
                    continue;
                }
                None => {
                    findings.push(
                        Finding::new(
                            id,
                            severity,
                            format!(
                                "unable to read file `{}`: referenced proposal was not loaded",
                                Resources::file_name(number)
                            ),
                        )
                        .with_slice(FindingSlice::from_header(
                            header,
                            highlight,
                            "required from here",
                        )),
                    );
                    continue;
                }
            };

            let their_tier = self.tier(&map, their_doc);

            if their_tier < min {
                min = their_tier;
            }

            if their_tier >= my_tier {
                continue;
            }

            too_unstable.push(FindingAnnotation::tracking(
                highlight,
                "has a less advanced status",
            ));
        }

        if !too_unstable.is_empty() {
            let status_value = doc
                .by_name(&self.status)
                .map(|h| h.raw_value())
                .unwrap_or("<missing>")
                .trim();

            let mut finding = Finding::new(
                id,
                severity,
                format!(
                    "preamble header `{}` contains items not stable enough for a `{}` of `{}`",
                    self.requires, self.status, status_value,
                ),
            )
            .with_slice(FindingSlice::with_annotations(header, too_unstable));

            let mut choices: Vec<_> = map
                .iter()
                .filter_map(|(value, tier)| (*tier <= min).then(|| value.to_string()))
                .collect();
            choices.sort();
            let choices = choices.join("`, `");

            if !choices.is_empty() {
                finding = finding.with_footer(
                    Severity::Help,
                    format!(
                        "valid `{}` values for this proposal are: `{}`",
                        self.status, choices
                    ),
                );
            }

            findings.push(finding);
        }

        findings
    }
}
