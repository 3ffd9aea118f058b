use crate::config::{ConfigError, Options};
use crate::linter::modifiers::{self, Modifier};
use crate::linter::resolver::Overrides;
use crate::linter::resources::Resources;
use crate::linter::rules::Registry;
use crate::preamble::{Document, ParseError};
use crate::render::{self, Diagnostic, FormatOptions};

#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;

/// One input to a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub origin: Option<String>,
    pub text: String,
}

impl Source {
    pub fn new(origin: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            origin: Some(origin.into()),
            text: text.into(),
        }
    }

    pub fn anonymous(text: impl Into<String>) -> Self {
        Self {
            origin: None,
            text: text.into(),
        }
    }
}

/// Per-document outcome of a batch; a parse failure stays in its slot
/// without disturbing the others.
pub type DocumentReport = Result<Vec<Diagnostic>, ParseError>;

/// A compiled lint configuration, reusable across any number of
/// documents.
///
/// Construction does all the validation; afterwards every stage is a
/// pure function of the document and the preloaded resources.
pub struct LintRunner {
    registry: Registry,
    overrides: Overrides,
    modifiers: Vec<Modifier>,
    format: FormatOptions,
}

impl LintRunner {
    pub fn new(options: &Options) -> Result<Self, ConfigError> {
        let registry = options.build_registry()?;
        registry.validate()?;

        let overrides = Overrides::new(
            options.warn.iter().cloned(),
            options.allow.iter().cloned(),
            options.deny.iter().cloned(),
        )?;
        for id in overrides.ids() {
            if !registry.contains(id) {
                return Err(ConfigError::UnknownRule { id: id.to_string() });
            }
        }

        Ok(Self {
            registry,
            overrides,
            modifiers: options.default_modifiers.clone(),
            format: FormatOptions::default(),
        })
    }

    /// Replaces the render options stamped onto produced diagnostics.
    pub fn with_format(mut self, format: FormatOptions) -> Self {
        self.format = format;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Checks a single document against the compiled configuration.
    pub fn lint(
        &self,
        origin: Option<&str>,
        text: &str,
        resources: &Resources,
    ) -> Result<Vec<Diagnostic>, ParseError> {
        let document = Document::parse(origin, text)?;
        Ok(self.finish(&document, resources))
    }

    /// Checks a whole batch, resolving cross-document references from
    /// the batch itself: a source whose file name follows the
    /// `proposal-N.md` convention serves as proposal `N`.
    pub fn lint_batch(&self, sources: &[Source]) -> Vec<DocumentReport> {
        let parsed = parse_all(sources);

        let mut resources = Resources::new();
        for document in parsed.iter().flatten() {
            if let Some(number) = document.origin().and_then(Resources::origin_number) {
                resources.insert(number, document.clone());
            }
        }

        self.finish_batch(parsed, &resources)
    }

    /// Checks a batch against caller-supplied resources, for callers
    /// that preload siblings from disk or elsewhere.
    pub fn lint_batch_with(
        &self,
        sources: &[Source],
        resources: &Resources,
    ) -> Vec<DocumentReport> {
        self.finish_batch(parse_all(sources), resources)
    }

    fn finish(&self, document: &Document, resources: &Resources) -> Vec<Diagnostic> {
        log::debug!(
            "Checking {} against {} rule(s)",
            document.origin().unwrap_or("<unnamed>"),
            self.registry.len()
        );

        self.registry
            .evaluate(document, resources)
            .into_iter()
            .filter_map(|finding| self.overrides.resolve(finding))
            .map(|finding| modifiers::apply(finding, &self.modifiers))
            .map(|finding| render::render(&finding, &self.format))
            .collect()
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn finish_batch(
        &self,
        parsed: Vec<Result<Document, ParseError>>,
        resources: &Resources,
    ) -> Vec<DocumentReport> {
        parsed
            .into_par_iter()
            .map(|result| result.map(|document| self.finish(&document, resources)))
            .collect()
    }

    #[cfg(target_arch = "wasm32")]
    fn finish_batch(
        &self,
        parsed: Vec<Result<Document, ParseError>>,
        resources: &Resources,
    ) -> Vec<DocumentReport> {
        parsed
            .into_iter()
            .map(|result| result.map(|document| self.finish(&document, resources)))
            .collect()
    }
}

fn parse_all(sources: &[Source]) -> Vec<Result<Document, ParseError>> {
    sources
        .iter()
        .map(|source| Document::parse(source.origin.as_deref(), &source.text))
        .collect()
}
