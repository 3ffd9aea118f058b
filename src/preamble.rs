use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::linter::findings::Severity;
use crate::render::{Diagnostic, DiagnosticSlice, Title};

/// A preamble delimiter is a line containing exactly `---`.
static DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|\n)---(\n|$)").expect("delimiter pattern is valid"));

/// A highlighted region within one physical line of a document.
///
/// `line_start` is 1-based; `column_range` holds 0-based byte offsets into
/// that line. Spans are immutable once produced by parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpan {
    pub origin: Option<String>,
    pub line_start: usize,
    pub column_range: (usize, usize),
}

/// One `name: value` pair from a document preamble.
///
/// The raw value preserves the text after the first `:` exactly as written,
/// including any leading space. Uniqueness of names is not guaranteed here;
/// duplicate detection is a lint rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreambleHeader {
    name: String,
    raw_value: String,
    source_line: String,
    span: SourceSpan,
}

impl PreambleHeader {
    /// Key (before the colon) of this preamble header.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value (after the colon) of this preamble header.
    pub fn raw_value(&self) -> &str {
        &self.raw_value
    }

    /// The whole physical line the header was written on.
    pub fn source_line(&self) -> &str {
        &self.source_line
    }

    pub fn span(&self) -> &SourceSpan {
        &self.span
    }

    /// Line the header was defined on (1-based).
    pub fn line_start(&self) -> usize {
        self.span.line_start
    }
}

/// A parsed proposal document: ordered preamble headers plus body text.
///
/// Immutable after construction; rule evaluation never mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    origin: Option<String>,
    headers: Vec<PreambleHeader>,
    body: String,
    body_span: SourceSpan,
}

impl Document {
    /// Parses raw text into a document.
    ///
    /// The preamble must open on the very first line with `---` and close
    /// with a second `---` line. Every preamble line must contain a `:`
    /// separating the header name from its value. All malformed lines are
    /// collected before failing, so one bad header does not hide the next.
    pub fn parse(origin: Option<&str>, text: &str) -> Result<Self, ParseError> {
        let (preamble, body) = split(text)?;

        let mut headers = Vec::new();
        let mut malformed = Vec::new();

        for (index, line) in preamble.split('\n').enumerate() {
            // Physical lines are 1-based and the opening `---` is line 1.
            let line_start = index + 2;

            match line.split_once(':') {
                Some((name, value)) => headers.push(PreambleHeader {
                    name: name.to_owned(),
                    raw_value: value.to_owned(),
                    source_line: line.to_owned(),
                    span: SourceSpan {
                        origin: origin.map(str::to_owned),
                        line_start,
                        column_range: (0, line.len()),
                    },
                }),
                None => malformed.push(MalformedLine {
                    line_start,
                    text: line.to_owned(),
                }),
            }
        }

        if !malformed.is_empty() {
            return Err(ParseError::MalformedFields(malformed));
        }

        let body_line_start = headers.len() + 3;
        let body_first_line = body.split('\n').next().unwrap_or_default();

        Ok(Self {
            origin: origin.map(str::to_owned),
            body_span: SourceSpan {
                origin: origin.map(str::to_owned),
                line_start: body_line_start,
                column_range: (0, body_first_line.len()),
            },
            headers,
            body: body.to_owned(),
        })
    }

    /// Decodes raw bytes and parses them as a document.
    ///
    /// Undecodable bytes fail with [`ParseError::InvalidUtf8`] rather
    /// than an I/O error, so loaders can report them per-document.
    pub fn parse_bytes(origin: Option<&str>, bytes: &[u8]) -> Result<Self, ParseError> {
        let text = std::str::from_utf8(bytes).map_err(|_| ParseError::InvalidUtf8)?;
        Self::parse(origin, text)
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    /// Headers in the order they appear in the source text.
    pub fn headers(&self) -> impl Iterator<Item = &PreambleHeader> {
        self.headers.iter()
    }

    /// Looks a header up by name. Later duplicates shadow earlier ones.
    pub fn by_name(&self, name: &str) -> Option<&PreambleHeader> {
        self.headers.iter().rev().find(|h| h.name() == name)
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn body_span(&self) -> &SourceSpan {
        &self.body_span
    }
}

/// Divides raw text into a preamble portion and a body portion.
fn split(text: &str) -> Result<(&str, &str), ParseError> {
    let mut markers = DELIMITER.find_iter(text);

    let start = markers.next().ok_or(ParseError::MissingStart)?;
    let end = markers.next().ok_or(ParseError::MissingEnd)?;

    if start.start() != 0 {
        return Err(ParseError::LeadingGarbage);
    }

    Ok((&text[start.end()..end.start()], &text[end.end()..]))
}

/// A preamble line that was missing its `:` separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    pub line_start: usize,
    pub text: String,
}

/// Why a document could not be parsed.
///
/// Parse failures are per-document: one bad document never aborts its
/// siblings in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No opening delimiter line anywhere in the input.
    MissingStart,
    /// Content appeared before the opening delimiter line.
    LeadingGarbage,
    /// The closing delimiter line was not found.
    MissingEnd,
    /// Preamble lines missing the `:` separator, in source order.
    MalformedFields(Vec<MalformedLine>),
    /// The document bytes were not valid UTF-8.
    InvalidUtf8,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStart | Self::LeadingGarbage => {
                write!(f, "first line must be `---` exactly")
            }
            Self::MissingEnd => {
                write!(f, "preamble must be followed by a line containing `---` exactly")
            }
            Self::MalformedFields(lines) => {
                write!(f, "missing delimiter `:` in {} preamble field(s)", lines.len())
            }
            Self::InvalidUtf8 => write!(f, "document is not valid UTF-8"),
        }
    }
}

impl std::error::Error for ParseError {}

impl ParseError {
    /// Presents the failure in the same visual language as lint findings.
    ///
    /// The returned diagnostics carry no rule id; severity is always
    /// `Error`.
    pub fn to_diagnostics(&self, origin: Option<&str>, source: &str) -> Vec<Diagnostic> {
        match self {
            Self::MissingStart | Self::LeadingGarbage => {
                let mut diagnostic = Diagnostic {
                    title: Title {
                        annotation_type: Severity::Error,
                        id: None,
                        label: "first line must be `---` exactly".to_owned(),
                    },
                    slices: vec![DiagnosticSlice {
                        origin: origin.map(str::to_owned),
                        line_start: 1,
                        fold: false,
                        source: source.lines().next().unwrap_or_default().to_owned(),
                        annotations: Vec::new(),
                    }],
                    footer: Vec::new(),
                    opt: Default::default(),
                };
                if source.as_bytes().get(3) == Some(&b'\r') {
                    diagnostic = diagnostic.footer(
                        Severity::Help,
                        "found a carriage return (CR), use Unix-style line endings (LF) instead",
                    );
                }
                vec![diagnostic]
            }
            Self::MissingEnd => vec![Diagnostic::title_only(
                Severity::Error,
                None,
                "preamble must be followed by a line containing `---` exactly",
            )],
            Self::MalformedFields(lines) => lines
                .iter()
                .map(|line| Diagnostic {
                    title: Title {
                        annotation_type: Severity::Error,
                        id: None,
                        label: "missing delimiter `:` in preamble field".to_owned(),
                    },
                    slices: vec![DiagnosticSlice {
                        origin: origin.map(str::to_owned),
                        line_start: line.line_start,
                        fold: false,
                        source: line.text.clone(),
                        annotations: Vec::new(),
                    }],
                    footer: Vec::new(),
                    opt: Default::default(),
                })
                .collect(),
            Self::InvalidUtf8 => vec![Diagnostic::title_only(
                Severity::Error,
                None,
                "document is not valid UTF-8",
            )],
        }
    }
}
