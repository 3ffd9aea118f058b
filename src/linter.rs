pub mod findings;
pub mod modifiers;
pub mod resolver;
pub mod resources;
pub mod rules;
pub mod runner;

pub use findings::{Finding, FindingAnnotation, FindingSlice, Footer, Severity};
pub use modifiers::Modifier;
pub use resolver::Overrides;
pub use resources::{Resource, Resources};
pub use rules::{Registry, RuleDefinition, RuleKind};
pub use runner::{DocumentReport, LintRunner, Source};

use crate::config::{ConfigError, Options};
use crate::render::Diagnostic;

use rules::pattern::Mode;

/// Lints a single proposal document and returns its rendered
/// diagnostics.
///
/// # Examples
///
/// ```no_run
/// use gavel::{Options, Resources, lint};
///
/// let text = "---\nproposal: 1\ntitle: An example\n---\n";
/// let diagnostics =
///     lint(Some("proposal-1.md"), text, &Options::default(), &Resources::new()).unwrap();
///
/// for diagnostic in &diagnostics {
///     println!("{}", gavel::format(diagnostic).unwrap());
/// }
/// ```
///
/// # Arguments
///
/// * `origin` - Display name for the document, usually its file name
/// * `text` - The document content to check
/// * `options` - Rule set and severity configuration
/// * `resources` - Preloaded sibling proposals for cross-document rules
pub fn lint(
    origin: Option<&str>,
    text: &str,
    options: &Options,
    resources: &Resources,
) -> Result<Vec<Diagnostic>, crate::Error> {
    #[cfg(debug_assertions)]
    {
        crate::init_logger();
    }

    let runner = LintRunner::new(options)?;
    Ok(runner.lint(origin, text, resources)?)
}

/// Lints a batch of documents, one report per source in input order.
///
/// Sources named `proposal-N.md` are visible to each other as
/// cross-document references, so a batch can be checked without any
/// sibling files on disk.
pub fn lint_batch(
    sources: &[Source],
    options: &Options,
) -> Result<Vec<DocumentReport>, ConfigError> {
    #[cfg(debug_assertions)]
    {
        crate::init_logger();
    }

    let runner = LintRunner::new(options)?;
    Ok(runner.lint_batch(sources))
}

/// Create the default rule registry with all built-in rules.
pub fn default_registry() -> Registry {
    let mut registry = Registry::new();

    registry.register(
        "preamble-required",
        RuleDefinition::new(RuleKind::PreambleRequired(rules::required::Required {
            headers: names(&[
                "proposal",
                "title",
                "description",
                "author",
                "discussions-to",
                "status",
                "type",
                "created",
            ]),
        })),
    );
    registry.register(
        "preamble-order",
        RuleDefinition::new(RuleKind::PreambleOrder(rules::order::Order {
            headers: names(&[
                "proposal",
                "title",
                "description",
                "author",
                "discussions-to",
                "status",
                "type",
                "category",
                "created",
                "updated",
                "requires",
                "withdrawal-reason",
            ]),
        })),
    );
    registry.register(
        "preamble-no-duplicates",
        RuleDefinition::new(RuleKind::PreambleNoDuplicates),
    );
    registry.register("preamble-trim", RuleDefinition::new(RuleKind::PreambleTrim));
    registry.register(
        "preamble-file-name",
        RuleDefinition::new(RuleKind::PreambleFileName(rules::file_name::FileName {
            header: "proposal".to_string(),
            prefix: "proposal-".to_string(),
            suffix: ".md".to_string(),
        })),
    );
    registry.register(
        "preamble-uint-proposal",
        RuleDefinition::new(RuleKind::PreambleUint(rules::uint::Uint {
            header: "proposal".to_string(),
        })),
    );
    registry.register(
        "preamble-len-title",
        RuleDefinition::new(RuleKind::PreambleLength(rules::length::Length {
            header: "title".to_string(),
            min: Some(2),
            max: Some(44),
        })),
    );
    registry.register(
        "preamble-len-description",
        RuleDefinition::new(RuleKind::PreambleLength(rules::length::Length {
            header: "description".to_string(),
            min: Some(2),
            max: Some(140),
        })),
    );
    registry.register(
        "preamble-enum-status",
        RuleDefinition::new(RuleKind::PreambleOneOf(rules::one_of::OneOf {
            header: "status".to_string(),
            values: names(&[
                "Draft",
                "Review",
                "Last Call",
                "Final",
                "Stagnant",
                "Withdrawn",
                "Living",
            ]),
        })),
    );
    registry.register(
        "preamble-enum-type",
        RuleDefinition::new(RuleKind::PreambleOneOf(rules::one_of::OneOf {
            header: "type".to_string(),
            values: names(&["Standards Track", "Meta", "Informational"]),
        })),
    );
    registry.register(
        "preamble-enum-category",
        RuleDefinition::new(RuleKind::PreambleOneOf(rules::one_of::OneOf {
            header: "category".to_string(),
            values: names(&["Core", "Networking", "Interface", "Application"]),
        })),
    );
    registry.register(
        "preamble-date-created",
        RuleDefinition::new(RuleKind::PreambleDate(rules::date::Date {
            header: "created".to_string(),
        })),
    );
    registry.register(
        "preamble-date-updated",
        RuleDefinition::new(RuleKind::PreambleDate(rules::date::Date {
            header: "updated".to_string(),
        })),
    );
    registry.register(
        "preamble-list-author",
        RuleDefinition::new(RuleKind::PreambleList(rules::list::List {
            header: "author".to_string(),
        })),
    );
    registry.register(
        "preamble-list-requires",
        RuleDefinition::new(RuleKind::PreambleList(rules::list::List {
            header: "requires".to_string(),
        })),
    );
    registry.register(
        "preamble-uint-list-requires",
        RuleDefinition::new(RuleKind::PreambleUintList(rules::uint::UintList {
            header: "requires".to_string(),
        })),
    );
    registry.register(
        "preamble-re-title",
        RuleDefinition::new(RuleKind::PreambleRegex(rules::pattern::Pattern {
            header: "title".to_string(),
            mode: Mode::Excludes,
            pattern: r"(?i)proposal[\s]*[0-9]+".to_string(),
            message: "preamble header `title` should not contain a proposal number".to_string(),
        })),
    );
    registry.register(
        "preamble-re-description",
        RuleDefinition::new(RuleKind::PreambleRegex(rules::pattern::Pattern {
            header: "description".to_string(),
            mode: Mode::Excludes,
            pattern: r"(?i)proposal[\s]*[0-9]+".to_string(),
            message: "preamble header `description` should not contain a proposal number"
                .to_string(),
        })),
    );
    registry.register(
        "preamble-re-discussions-to",
        RuleDefinition::new(RuleKind::PreambleRegex(rules::pattern::Pattern {
            header: "discussions-to".to_string(),
            mode: Mode::Includes,
            pattern: "^https://".to_string(),
            message: "preamble header `discussions-to` must be a URL".to_string(),
        })),
    );
    registry.register(
        "preamble-req-category",
        RuleDefinition::new(RuleKind::PreambleRequiredIfEq(
            rules::required_if_eq::RequiredIfEq {
                when: "type".to_string(),
                equals: "Standards Track".to_string(),
                then: "category".to_string(),
            },
        )),
    );
    registry.register(
        "preamble-req-withdrawal-reason",
        RuleDefinition::new(RuleKind::PreambleRequiredIfEq(
            rules::required_if_eq::RequiredIfEq {
                when: "status".to_string(),
                equals: "Withdrawn".to_string(),
                then: "withdrawal-reason".to_string(),
            },
        )),
    );
    registry.register(
        "preamble-requires-status",
        RuleDefinition::new(RuleKind::PreambleRequiresStatus(
            rules::requires_status::RequiresStatus {
                requires: "requires".to_string(),
                status: "status".to_string(),
                flow: vec![
                    names(&["Draft", "Stagnant"]),
                    names(&["Review"]),
                    names(&["Last Call"]),
                    names(&["Final", "Withdrawn", "Living"]),
                ],
            },
        )),
    );

    registry
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
