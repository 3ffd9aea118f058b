//! Wire form and text form of diagnostics.
//!
//! A [`Diagnostic`] is the stable, serializable output of a lint run;
//! [`format`] lays it out as the familiar compiler-style text block.

use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use crate::linter::findings::{Finding, Severity};

/// Root of the published rule documentation; every rendered finding links
/// to the page for its rule id.
pub const DOCS_BASE: &str = "https://gavel-lint.github.io/gavel/";

/// Rendering switches carried alongside each diagnostic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    pub anonymized_line_numbers: bool,
    pub color: bool,
}

/// Title of a diagnostic. Footers reuse the same shape with `id` unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    pub annotation_type: Severity,
    pub id: Option<String>,
    pub label: String,
}

/// An underlined range within a slice; `range` holds byte offsets into
/// the slice's source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub annotation_type: Severity,
    pub label: String,
    pub range: (usize, usize),
}

/// An excerpt of source text shown under a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticSlice {
    pub origin: Option<String>,
    pub line_start: usize,
    pub fold: bool,
    pub source: String,
    pub annotations: Vec<Annotation>,
}

/// One reportable problem, fully resolved and ready to serialize or lay
/// out as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub title: Title,
    pub slices: Vec<DiagnosticSlice>,
    pub footer: Vec<Title>,
    pub opt: FormatOptions,
}

impl Diagnostic {
    pub fn title_only(
        annotation_type: Severity,
        id: Option<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            title: Title {
                annotation_type,
                id,
                label: label.into(),
            },
            slices: Vec::new(),
            footer: Vec::new(),
            opt: FormatOptions::default(),
        }
    }

    pub fn footer(mut self, annotation_type: Severity, label: impl Into<String>) -> Self {
        self.footer.push(Title {
            annotation_type,
            id: None,
            label: label.into(),
        });
        self
    }
}

/// A `Diagnostic` too malformed to lay out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    ZeroLineStart,
    InvertedRange { start: usize, end: usize },
    TitleKind(Severity),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroLineStart => write!(f, "slice line numbers are 1-based"),
            Self::InvertedRange { start, end } => {
                write!(f, "annotation range ({start}, {end}) is inverted")
            }
            Self::TitleKind(kind) => {
                write!(f, "`{}` cannot be used as a title severity", kind.as_str())
            }
        }
    }
}

impl std::error::Error for RenderError {}

/// Converts a resolved finding into its wire form.
///
/// Tracking annotations (those without a pinned severity) take the
/// finding's severity here; a documentation link for the rule id is
/// appended as a final Help footer.
pub fn render(finding: &Finding, opt: &FormatOptions) -> Diagnostic {
    let slices = finding
        .slices
        .iter()
        .map(|slice| DiagnosticSlice {
            origin: slice.span.origin.clone(),
            line_start: slice.span.line_start,
            fold: slice.fold,
            source: slice.source.clone(),
            annotations: slice
                .annotations
                .iter()
                .map(|annotation| Annotation {
                    annotation_type: annotation.severity.unwrap_or(finding.severity),
                    label: annotation.note.clone(),
                    range: annotation.highlight,
                })
                .collect(),
        })
        .collect();

    let mut footer: Vec<_> = finding
        .footer
        .iter()
        .map(|entry| Title {
            annotation_type: entry.kind,
            id: None,
            label: entry.label.clone(),
        })
        .collect();
    footer.push(Title {
        annotation_type: Severity::Help,
        id: None,
        label: format!("see {}{}/", DOCS_BASE, finding.rule_id),
    });

    Diagnostic {
        title: Title {
            annotation_type: finding.severity,
            id: Some(finding.rule_id.clone()),
            label: finding.message.clone(),
        },
        slices,
        footer,
        opt: *opt,
    }
}

fn color_code(kind: Severity) -> &'static str {
    match kind {
        Severity::Error => "\x1b[31m",   // red
        Severity::Warning => "\x1b[33m", // yellow
        Severity::Info => "\x1b[34m",    // blue
        Severity::Note => "\x1b[1m",     // bold
        Severity::Help => "\x1b[36m",    // cyan
    }
}

fn severity_token(kind: Severity, color: bool) -> String {
    if color {
        format!("{}{}\x1b[0m", color_code(kind), kind.as_str())
    } else {
        kind.as_str().to_owned()
    }
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn display_width(text: &str, byte_end: usize) -> usize {
    text[..floor_char_boundary(text, byte_end)].width()
}

/// An annotation mapped onto one printed line, in display columns.
struct LineAnnotation<'a> {
    start_col: usize,
    end_col: usize,
    label: &'a str,
    kind: Severity,
}

impl LineAnnotation<'_> {
    fn mark(&self) -> char {
        if self.kind == Severity::Error { '^' } else { '-' }
    }

    /// Labels of secondary annotations carry their kind inline.
    fn display_label(&self) -> String {
        match self.kind {
            Severity::Error | Severity::Warning => self.label.to_owned(),
            kind => format!("{}: {}", kind.as_str(), self.label),
        }
    }
}

enum Row<'a> {
    Source {
        number: usize,
        text: &'a str,
        annotations: Vec<LineAnnotation<'a>>,
    },
    Ellipsis,
}

struct SliceLayout<'a> {
    origin: Option<&'a str>,
    rows: Vec<Row<'a>>,
    /// Real line number and 1-based display column of the first
    /// annotation, shown after the origin.
    position: Option<(usize, usize)>,
}

impl<'a> SliceLayout<'a> {
    fn new(slice: &'a DiagnosticSlice) -> Self {
        let mut lines = Vec::new();
        let mut start = 0;
        for (index, text) in slice.source.split('\n').enumerate() {
            lines.push((slice.line_start + index, start, text));
            start += text.len() + 1;
        }

        let mut per_line: Vec<Vec<LineAnnotation<'a>>> =
            lines.iter().map(|_| Vec::new()).collect();
        let mut position = None;
        for annotation in &slice.annotations {
            let clamped_start = annotation.range.0.min(slice.source.len());
            let index = lines
                .iter()
                .rposition(|(_, line_start, _)| *line_start <= clamped_start)
                .unwrap_or(0);
            let (number, line_start, text) = lines[index];
            let local_start = (clamped_start - line_start).min(text.len());
            let local_end = annotation
                .range
                .1
                .saturating_sub(line_start)
                .min(text.len())
                .max(local_start);
            let start_col = display_width(text, local_start);
            let end_col = display_width(text, local_end);
            if position.is_none() {
                position = Some((number, start_col + 1));
            }
            per_line[index].push(LineAnnotation {
                start_col,
                end_col,
                label: &annotation.label,
                kind: annotation.annotation_type,
            });
        }

        let annotated: Vec<usize> = per_line
            .iter()
            .enumerate()
            .filter_map(|(index, set)| (!set.is_empty()).then_some(index))
            .collect();

        let keep: Vec<usize> = if !slice.fold {
            (0..lines.len()).collect()
        } else {
            (0..lines.len())
                .filter(|index| annotated.iter().any(|a| index.abs_diff(*a) <= 1))
                .collect()
        };

        let mut rows = Vec::new();
        let mut previous: Option<usize> = None;
        for index in keep {
            if previous.is_some_and(|p| index > p + 1) {
                rows.push(Row::Ellipsis);
            }
            previous = Some(index);
            let (number, _, text) = lines[index];
            rows.push(Row::Source {
                number,
                text,
                annotations: std::mem::take(&mut per_line[index]),
            });
        }

        Self {
            origin: slice.origin.as_deref(),
            rows,
            position,
        }
    }

    fn max_line_number(&self) -> Option<usize> {
        self.rows
            .iter()
            .filter_map(|row| match row {
                Row::Source { number, .. } => Some(*number),
                Row::Ellipsis => None,
            })
            .max()
    }
}

fn validate(diagnostic: &Diagnostic) -> Result<(), RenderError> {
    if matches!(
        diagnostic.title.annotation_type,
        Severity::Note | Severity::Help
    ) {
        return Err(RenderError::TitleKind(diagnostic.title.annotation_type));
    }
    for slice in &diagnostic.slices {
        if slice.line_start == 0 {
            return Err(RenderError::ZeroLineStart);
        }
        for annotation in &slice.annotations {
            if annotation.range.0 > annotation.range.1 {
                return Err(RenderError::InvertedRange {
                    start: annotation.range.0,
                    end: annotation.range.1,
                });
            }
        }
    }
    Ok(())
}

/// Writes `text` into `row` starting at display column `col`, padding
/// with spaces as needed. Columns are relative to the gutter.
fn put(row: &mut String, col: usize, text: &str) {
    let current = row.width();
    if current < col {
        row.push_str(&" ".repeat(col - current));
    }
    row.push_str(text);
}

fn annotation_rows(
    out: &mut Vec<String>,
    gutter: &str,
    mut set: Vec<LineAnnotation<'_>>,
    color: bool,
) {
    set.sort_by_key(|a| (a.start_col, a.end_col));

    // The annotation reaching furthest right keeps its label inline;
    // the rest stack underneath, rustc style.
    let Some(inline) = set
        .iter()
        .enumerate()
        .max_by_key(|(index, a)| (a.end_col, *index))
        .map(|(index, _)| index)
    else {
        return;
    };

    // Escape sequences have no display width, so the mark row tracks its
    // own cursor instead of measuring the buffer.
    let mut marks = format!("{gutter} ");
    let mut cursor = 0;
    for annotation in &set {
        let start = annotation.start_col.max(cursor);
        if annotation.end_col <= start {
            continue;
        }
        marks.push_str(&" ".repeat(start - cursor));
        let run = annotation
            .mark()
            .to_string()
            .repeat(annotation.end_col - start);
        if color {
            marks.push_str(color_code(annotation.kind));
            marks.push_str(&run);
            marks.push_str("\x1b[0m");
        } else {
            marks.push_str(&run);
        }
        cursor = annotation.end_col;
    }
    let inline_label = set[inline].display_label();
    if !inline_label.is_empty() {
        marks.push(' ');
        marks.push_str(&inline_label);
    }
    out.push(marks);

    let pending: Vec<&LineAnnotation<'_>> = set
        .iter()
        .enumerate()
        .filter_map(|(index, a)| (index != inline).then_some(a))
        .collect();
    if pending.is_empty() {
        return;
    }

    let mut pipes = format!("{gutter} ");
    for annotation in &pending {
        put(&mut pipes, gutter.len() + 1 + annotation.start_col, "|");
    }
    out.push(pipes);

    for last in (0..pending.len()).rev() {
        let mut row = format!("{gutter} ");
        for annotation in &pending[..last] {
            put(&mut row, gutter.len() + 1 + annotation.start_col, "|");
        }
        put(
            &mut row,
            gutter.len() + 1 + pending[last].start_col,
            &pending[last].display_label(),
        );
        out.push(row);
    }
}

/// Lays a diagnostic out as text. The result carries no trailing newline;
/// callers stacking several diagnostics add their own separators.
pub fn format(diagnostic: &Diagnostic) -> Result<String, RenderError> {
    validate(diagnostic)?;

    let opt = diagnostic.opt;
    let layouts: Vec<SliceLayout<'_>> = diagnostic.slices.iter().map(SliceLayout::new).collect();

    let width = if opt.anonymized_line_numbers {
        2
    } else {
        layouts
            .iter()
            .filter_map(SliceLayout::max_line_number)
            .max()
            .map(|number| number.to_string().len())
            .unwrap_or(1)
    };
    let gutter = format!("{}|", " ".repeat(width + 1));

    let mut out = Vec::new();

    let title = &diagnostic.title;
    let token = severity_token(title.annotation_type, opt.color);
    match &title.id {
        Some(id) => out.push(format!("{token}[{id}]: {}", title.label)),
        None => out.push(format!("{token}: {}", title.label)),
    }

    let mut printed_any = false;
    for layout in &layouts {
        if layout.rows.is_empty() {
            continue;
        }

        if let Some(origin) = layout.origin {
            let arrow = if printed_any { ":::" } else { "-->" };
            let mut row = format!("{}{arrow} {origin}", " ".repeat(width));
            if let Some((line, column)) = layout.position {
                row.push_str(&format!(":{line}:{column}"));
            }
            out.push(row);
        }
        out.push(gutter.clone());

        for row in &layout.rows {
            match row {
                Row::Source {
                    number,
                    text,
                    annotations,
                } => {
                    let lineno = if opt.anonymized_line_numbers {
                        "LL".to_owned()
                    } else {
                        number.to_string()
                    };
                    if text.is_empty() {
                        out.push(format!("{lineno:>width$} |"));
                    } else {
                        out.push(format!("{lineno:>width$} | {text}"));
                    }
                    if !annotations.is_empty() {
                        let set = annotations
                            .iter()
                            .map(|a| LineAnnotation {
                                start_col: a.start_col,
                                end_col: a.end_col,
                                label: a.label,
                                kind: a.kind,
                            })
                            .collect();
                        annotation_rows(&mut out, &gutter, set, opt.color);
                    }
                }
                Row::Ellipsis => out.push("...".to_owned()),
            }
        }
        out.push(gutter.clone());
        printed_any = true;
    }

    for entry in &diagnostic.footer {
        let token = severity_token(entry.annotation_type, opt.color);
        out.push(format!(
            "{}= {token}: {}",
            " ".repeat(width + 1),
            entry.label
        ));
    }

    Ok(out.join("\n"))
}
