pub mod config;
pub mod linter;
pub mod preamble;
pub mod render;

pub use config::{ConfigError, Options};
pub use linter::{
    DocumentReport, LintRunner, Registry, Resources, Severity, Source, default_registry, lint,
    lint_batch,
};
pub use preamble::{Document, ParseError};
pub use render::{Diagnostic, FormatOptions, format};

use std::error;
use std::fmt;

pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A failure from the single-document entry points.
///
/// Configuration problems abort the whole invocation before anything is
/// checked; parse failures concern only the document that produced
/// them.
#[derive(Debug)]
pub enum Error {
    Config(ConfigError),
    Parse(ParseError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(error) => error.fmt(f),
            Self::Parse(error) => error.fmt(f),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Config(error) => Some(error),
            Self::Parse(error) => Some(error),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(error: ConfigError) -> Self {
        Self::Config(error)
    }
}

impl From<ParseError> for Error {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}
