use std::collections::BTreeMap;

use crate::preamble::Document;

/// Outcome of loading one referenced proposal.
#[derive(Debug, Clone)]
pub enum Resource {
    Loaded(Document),
    Unavailable { path: String, reason: String },
}

/// Preloaded cross-document context for rules that read sibling
/// proposals.
///
/// Evaluation never touches the filesystem; callers resolve
/// [`Registry::references`](crate::linter::rules::Registry::references)
/// up front and record each outcome here, load failures included.
#[derive(Debug, Clone, Default)]
pub struct Resources {
    entries: BTreeMap<u64, Resource>,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical file name for a referenced proposal number.
    pub fn file_name(number: u64) -> String {
        format!("proposal-{number}.md")
    }

    /// Reads a proposal number back out of an origin path, if its file
    /// name follows the sibling convention.
    pub fn origin_number(origin: &str) -> Option<u64> {
        std::path::Path::new(origin)
            .file_name()?
            .to_str()?
            .strip_prefix("proposal-")?
            .strip_suffix(".md")?
            .parse()
            .ok()
    }

    pub fn insert(&mut self, number: u64, document: Document) {
        self.entries.insert(number, Resource::Loaded(document));
    }

    pub fn insert_unavailable(
        &mut self,
        number: u64,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) {
        self.entries.insert(
            number,
            Resource::Unavailable {
                path: path.into(),
                reason: reason.into(),
            },
        );
    }

    pub fn get(&self, number: u64) -> Option<&Resource> {
        self.entries.get(&number)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
