use serde::{Deserialize, Serialize};

use crate::preamble::{PreambleHeader, SourceSpan};

/// Severity and annotation kind shared by findings and diagnostics.
///
/// Serializes PascalCase on the wire (`"Error"`); configuration files may
/// also spell values in lowercase (`annotation_type = "info"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    #[serde(alias = "error")]
    Error,
    #[serde(alias = "warning")]
    Warning,
    #[serde(alias = "info")]
    Info,
    #[serde(alias = "note")]
    Note,
    #[serde(alias = "help")]
    Help,
}

impl Severity {
    /// Lowercase token used in rendered text (`error[...]`, `= help: ...`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Note => "note",
            Self::Help => "help",
        }
    }
}

/// A footer note attached to a finding (`= help: ...` when rendered).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    pub kind: Severity,
    pub label: String,
}

/// One underlined range within a slice.
///
/// `severity: None` means the annotation tracks the finding's effective
/// severity through resolution and modification; `Some(_)` pins it (for
/// counterpart annotations like "first defined here"). `highlight` holds
/// byte offsets into the slice's line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindingAnnotation {
    pub highlight: (usize, usize),
    pub note: String,
    pub severity: Option<Severity>,
}

impl FindingAnnotation {
    pub fn tracking(highlight: (usize, usize), note: impl Into<String>) -> Self {
        Self {
            highlight,
            note: note.into(),
            severity: None,
        }
    }

    pub fn pinned(highlight: (usize, usize), note: impl Into<String>, severity: Severity) -> Self {
        Self {
            severity: Some(severity),
            ..Self::tracking(highlight, note)
        }
    }
}

/// One excerpt of source text attached to a finding.
///
/// A slice with no annotations shows its lines for context only; with
/// `fold` set, unannotated runs collapse when rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindingSlice {
    pub span: SourceSpan,
    pub source: String,
    pub fold: bool,
    pub annotations: Vec<FindingAnnotation>,
}

impl FindingSlice {
    /// A single tracking annotation on a header's line.
    pub fn from_header(
        header: &PreambleHeader,
        highlight: (usize, usize),
        note: impl Into<String>,
    ) -> Self {
        Self::with_annotations(header, vec![FindingAnnotation::tracking(highlight, note)])
    }

    /// A single annotation whose severity does not follow the finding's.
    pub fn pinned(
        header: &PreambleHeader,
        highlight: (usize, usize),
        note: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self::with_annotations(
            header,
            vec![FindingAnnotation::pinned(highlight, note, severity)],
        )
    }

    /// A header's line shown for context, without an underline row.
    pub fn unannotated(header: &PreambleHeader) -> Self {
        Self::with_annotations(header, Vec::new())
    }

    pub fn with_annotations(
        header: &PreambleHeader,
        annotations: Vec<FindingAnnotation>,
    ) -> Self {
        Self {
            span: header.span().clone(),
            source: header.source_line().to_owned(),
            fold: false,
            annotations,
        }
    }
}

/// A single rule observation.
///
/// Immutable by convention: the resolver and modifier stages consume a
/// finding and return a new one, so evaluation stays referentially
/// transparent and re-runnable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub rule_id: String,
    pub message: String,
    pub severity: Severity,
    /// Set once warn/allow/deny picked the severity; modifiers then leave
    /// the finding alone.
    pub severity_overridden: bool,
    pub slices: Vec<FindingSlice>,
    pub footer: Vec<Footer>,
}

impl Finding {
    pub fn new(rule_id: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.into(),
            message: message.into(),
            severity,
            severity_overridden: false,
            slices: Vec::new(),
            footer: Vec::new(),
        }
    }

    pub fn with_slice(mut self, slice: FindingSlice) -> Self {
        self.slices.push(slice);
        self
    }

    pub fn with_slices(mut self, slices: impl IntoIterator<Item = FindingSlice>) -> Self {
        self.slices.extend(slices);
        self
    }

    pub fn with_footer(mut self, kind: Severity, label: impl Into<String>) -> Self {
        self.footer.push(Footer {
            kind,
            label: label.into(),
        });
        self
    }
}
